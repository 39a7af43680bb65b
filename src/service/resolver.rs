use crate::error::UpstreamError;
use crate::models::{LineItem, Order};
use crate::upstream::{decode_records, JsonFetcher};
use std::sync::Arc;

/// 单个订单的商品明细拉取, 无共享可变状态, 可并发调用
#[derive(Clone)]
pub struct LineItemResolver {
    fetcher: Arc<dyn JsonFetcher>,
}

impl LineItemResolver {
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn fetch_line_items(&self, order: &Order) -> Result<Vec<LineItem>, UpstreamError> {
        let url = order.products.url.as_str();
        let fetched = match self.fetcher.fetch(url).await {
            Ok(value) => decode_records(url, value),
            Err(e) => Err(e),
        };

        fetched.map_err(|source| UpstreamError::LineItems {
            order_id: order.id,
            source: Box::new(source),
        })
    }
}
