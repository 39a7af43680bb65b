use crate::models::{LineItem, Order, SkuAggregate};
use crate::service::ProgressObserver;
use std::sync::Arc;

/// SKU 聚合器: 按输入顺序单线程折叠 (order, items) 对
pub struct Aggregator {
    brand_filter: Option<String>,
    progress: Arc<dyn ProgressObserver>,
}

impl Aggregator {
    /// 空字符串品牌等同于不过滤
    pub fn new(brand_filter: Option<String>, progress: Arc<dyn ProgressObserver>) -> Self {
        Self {
            brand_filter: brand_filter.filter(|b| !b.is_empty()),
            progress,
        }
    }

    pub fn aggregate(&self, pairs: &[(Order, Vec<LineItem>)]) -> SkuAggregate {
        let total = pairs.len();
        let mut aggregate = SkuAggregate::new();
        self.progress.on_start(total);

        for (idx, (order, items)) in pairs.iter().enumerate() {
            // 品牌精确匹配 (区分大小写)
            for item in items.iter().filter(|item| self.accepts(item)) {
                aggregate.merge(order.id, item);
            }
            self.progress.on_order(idx + 1, total);
        }

        self.progress.on_finish(total);
        aggregate
    }

    fn accepts(&self, item: &LineItem) -> bool {
        match &self.brand_filter {
            Some(brand) => item.brand == *brand,
            None => true,
        }
    }
}
