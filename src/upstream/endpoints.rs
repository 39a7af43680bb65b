use crate::error::UpstreamError;
use crate::models::DateWindow;
use reqwest::Url;

/// 订单列表接口: {api_base}/stores/{store_hash}/v2/orders
#[derive(Debug, Clone)]
pub struct OrdersEndpoint {
    base: Url,
    status_id: u32,
}

impl OrdersEndpoint {
    pub fn new(api_base: &str, store_hash: &str, status_id: u32) -> Result<Self, UpstreamError> {
        let raw = format!(
            "{}/stores/{}/v2/orders",
            api_base.trim_end_matches('/'),
            store_hash
        );
        let base = Url::parse(&raw)
            .map_err(|e| UpstreamError::Config(format!("invalid orders endpoint '{raw}': {e}")))?;
        Ok(Self { base, status_id })
    }

    /// 第 page 页 URL (page 从 1 开始)
    pub fn page_url(&self, window: &DateWindow, limit: u32, page: u32) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("status_id", &self.status_id.to_string())
            .append_pair("min_date_created", &window.start_param())
            .append_pair("max_date_created", &window.end_param())
            .append_pair("limit", &limit.to_string())
            .append_pair("page", &page.to_string());
        url.to_string()
    }
}
