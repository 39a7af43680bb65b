use crate::error::UpstreamError;
use crate::models::{DateWindow, Order};
use crate::upstream::{decode_records, JsonFetcher, OrdersEndpoint};
use std::sync::Arc;

/// 上游单页最大条数
pub const MAX_PAGE_SIZE: u32 = 200;

/// 订单分页拉取
///
/// 逐页顺序请求, 空页或不满一页即结束. 最后一页恰好满页时会再请求一次得到空页.
/// 连续两页订单 id 完全相同视为上游无进展; 页数超过 max_pages 视为上游异常.
pub struct OrderFetcher {
    fetcher: Arc<dyn JsonFetcher>,
    endpoint: OrdersEndpoint,
    page_size: u32,
    max_pages: u32,
}

impl OrderFetcher {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        endpoint: OrdersEndpoint,
        page_size: u32,
        max_pages: u32,
    ) -> Result<Self, UpstreamError> {
        // 超过上游上限时满页会被误判为短页, 直接拒绝
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(UpstreamError::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        if max_pages == 0 {
            return Err(UpstreamError::Config("max_pages must be at least 1".to_string()));
        }

        Ok(Self {
            fetcher,
            endpoint,
            page_size,
            max_pages,
        })
    }

    /// 拉取窗口内全部订单, 保持上游返回顺序
    pub async fn fetch_orders(&self, window: &DateWindow) -> Result<Vec<Order>, UpstreamError> {
        let mut orders: Vec<Order> = Vec::new();
        let mut previous_ids: Vec<u64> = Vec::new();
        let mut page: u32 = 1;

        loop {
            if page > self.max_pages {
                tracing::error!("Order listing still returning full pages after {} pages", self.max_pages);
                return Err(UpstreamError::PageLimit {
                    max_pages: self.max_pages,
                });
            }

            let url = self.endpoint.page_url(window, self.page_size, page);
            let value = self.fetcher.fetch(&url).await?;
            let batch: Vec<Order> = decode_records(&url, value)?;
            let count = batch.len();
            tracing::debug!("Order page {} returned {} orders", page, count);

            if batch.is_empty() {
                break;
            }

            let ids: Vec<u64> = batch.iter().map(|o| o.id).collect();
            if ids == previous_ids {
                tracing::error!("Order page {} repeats page {}, aborting", page, page - 1);
                return Err(UpstreamError::NoProgress { page });
            }

            orders.extend(batch);

            if count < self.page_size as usize {
                break;
            }

            previous_ids = ids;
            page += 1;
        }

        tracing::info!(
            "Fetched {} orders between {} and {} ({} pages)",
            orders.len(),
            window.start_param(),
            window.end_param(),
            page
        );
        Ok(orders)
    }
}
