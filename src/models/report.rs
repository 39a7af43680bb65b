use crate::models::LineItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// SKU 汇总行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub brand: String,
    pub sku: String,
    pub title: String,
    pub total_quantity: u64,
}

/// 同一 SKU 出现不同 brand/title 的记录; 保留首次出现的值
///
/// 每个 (sku, seen_brand, seen_title) 只记录一次, order_id 为首次出现的订单.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuConflict {
    pub sku: String,
    pub order_id: u64,
    pub kept_brand: String,
    pub kept_title: String,
    pub seen_brand: String,
    pub seen_title: String,
    /// 出现该差异的明细条数
    pub occurrences: usize,
}

/// SKU -> 汇总 映射, 只由聚合器单线程写入
#[derive(Debug, Clone, Default)]
pub struct SkuAggregate {
    entries: HashMap<String, AggregateEntry>,
    conflicts: Vec<SkuConflict>,
    conflict_index: HashMap<(String, String, String), usize>,
    line_items: usize,
}

impl SkuAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一条明细: 首次出现确定 brand/title, 数量累加
    pub fn merge(&mut self, order_id: u64, item: &LineItem) {
        self.line_items += 1;

        let entry = self
            .entries
            .entry(item.sku.clone())
            .or_insert_with(|| AggregateEntry {
                brand: item.brand.clone(),
                sku: item.sku.clone(),
                title: item.title.clone(),
                total_quantity: 0,
            });

        if entry.brand != item.brand || entry.title != item.title {
            let key = (item.sku.clone(), item.brand.clone(), item.title.clone());
            match self.conflict_index.get(&key) {
                Some(&idx) => self.conflicts[idx].occurrences += 1,
                None => {
                    tracing::warn!(
                        "SKU {} in order {} has brand/title '{}'/'{}', keeping first seen '{}'/'{}'",
                        item.sku, order_id, item.brand, item.title, entry.brand, entry.title
                    );
                    self.conflict_index.insert(key, self.conflicts.len());
                    self.conflicts.push(SkuConflict {
                        sku: item.sku.clone(),
                        order_id,
                        kept_brand: entry.brand.clone(),
                        kept_title: entry.title.clone(),
                        seen_brand: item.brand.clone(),
                        seen_title: item.title.clone(),
                        occurrences: 1,
                    });
                }
            }
        }

        entry.total_quantity = entry.total_quantity.saturating_add(item.quantity);
    }

    pub fn get(&self, sku: &str) -> Option<&AggregateEntry> {
        self.entries.get(sku)
    }

    pub fn entries(&self) -> impl Iterator<Item = &AggregateEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn conflicts(&self) -> &[SkuConflict] {
        &self.conflicts
    }

    /// 已合并的明细条数 (品牌过滤之后)
    pub fn line_items(&self) -> usize {
        self.line_items
    }
}

/// 排名后的输出行, rank 从 1 开始
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: AggregateEntry,
}

/// 核心流水线产出 (写出之前)
#[derive(Debug, Clone)]
pub struct SellThroughReport {
    pub orders: usize,
    pub line_items: usize,
    pub rows: Vec<RankedRow>,
    pub conflicts: Vec<SkuConflict>,
}

impl SellThroughReport {
    pub fn total_quantity(&self) -> u64 {
        self.rows
            .iter()
            .fold(0u64, |acc, row| acc.saturating_add(row.entry.total_quantity))
    }
}

/// 报表统计信息 (接口返回)
#[derive(Debug, Clone, Serialize)]
pub struct ReportStats {
    pub orders: usize,
    pub line_items: usize,
    pub skus: usize,
    pub total_quantity: u64,
    pub conflicts: Vec<SkuConflict>,
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, brand: &str, title: &str, quantity: u64) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            brand: brand.to_string(),
            title: title.to_string(),
            quantity,
        }
    }

    #[test]
    fn same_sku_sums_quantity() {
        let mut agg = SkuAggregate::new();
        agg.merge(1, &item("X", "Acme", "Widget", 3));
        agg.merge(2, &item("X", "Acme", "Widget", 5));

        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get("X").unwrap().total_quantity, 8);
        assert_eq!(agg.line_items(), 2);
        assert!(agg.conflicts().is_empty());
    }

    #[test]
    fn conflicting_identity_keeps_first_and_is_recorded() {
        let mut agg = SkuAggregate::new();
        agg.merge(1, &item("X", "Acme", "Widget", 1));
        agg.merge(2, &item("X", "Other", "Widget v2", 4));

        let entry = agg.get("X").unwrap();
        assert_eq!(entry.brand, "Acme");
        assert_eq!(entry.title, "Widget");
        assert_eq!(entry.total_quantity, 5);

        assert_eq!(agg.conflicts().len(), 1);
        let conflict = &agg.conflicts()[0];
        assert_eq!(conflict.order_id, 2);
        assert_eq!(conflict.seen_brand, "Other");
        assert_eq!(conflict.kept_title, "Widget");
    }

    #[test]
    fn repeated_conflict_is_recorded_once_per_variant() {
        let mut agg = SkuAggregate::new();
        agg.merge(1, &item("X", "Acme", "Widget", 1));
        for order_id in 2..=1_000 {
            agg.merge(order_id, &item("X", "Acme", "Widget v2", 1));
        }
        agg.merge(1_001, &item("X", "Other", "Widget", 1));

        assert_eq!(agg.get("X").unwrap().total_quantity, 1_001);
        assert_eq!(agg.conflicts().len(), 2);
        assert_eq!(agg.conflicts()[0].seen_title, "Widget v2");
        assert_eq!(agg.conflicts()[0].order_id, 2);
        assert_eq!(agg.conflicts()[0].occurrences, 999);
        assert_eq!(agg.conflicts()[1].seen_brand, "Other");
        assert_eq!(agg.conflicts()[1].occurrences, 1);
    }

    #[test]
    fn zero_quantity_still_creates_entry() {
        let mut agg = SkuAggregate::new();
        agg.merge(1, &item("Z", "Acme", "Zero", 0));
        assert_eq!(agg.get("Z").unwrap().total_quantity, 0);
    }
}
