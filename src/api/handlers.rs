use crate::error::ReportError;
use crate::models::{ReportStats, WindowSpec};
use crate::service::{ReportRequest, SellThroughService};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 请求体: 品牌 + 时间范围
#[derive(Debug, Deserialize)]
pub struct SellThroughRequest {
    /// 为空或缺省表示不过滤品牌
    #[serde(default)]
    pub brand: Option<String>,
    /// past week | past month | past quarter | past year | custom
    pub range: String,
    /// custom 时必填, DD/MM/YYYY
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// 响应体
#[derive(Debug, Serialize)]
pub struct SellThroughResponse {
    pub success: bool,
    pub message: String,
    pub stats: Option<ReportStats>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 生成销售报表
pub async fn sell_through(
    State(service): State<Arc<SellThroughService>>,
    Json(req): Json<SellThroughRequest>,
) -> Response {
    let window = match WindowSpec::parse(&req.range, req.start_date.as_deref(), req.end_date.as_deref()) {
        Ok(window) => window,
        Err(e) => return failure(StatusCode::BAD_REQUEST, format!("Error: {}", e)),
    };

    let request = ReportRequest {
        brand: req.brand.filter(|b| !b.trim().is_empty()),
        window,
    };

    match service.generate(&request, Utc::now()).await {
        Ok(stats) => {
            let response = SellThroughResponse {
                success: true,
                message: format!(
                    "Report generated as '{}': {} orders, {} SKUs, {} units",
                    stats.output, stats.orders, stats.skus, stats.total_quantity
                ),
                stats: Some(stats),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let status = match &e {
                ReportError::Input(_) => StatusCode::BAD_REQUEST,
                ReportError::Upstream(_) => StatusCode::BAD_GATEWAY,
                ReportError::Sink(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            failure(status, format!("Error: {}", e))
        }
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    let response = SellThroughResponse {
        success: false,
        message,
        stats: None,
    };
    (status, Json(response)).into_response()
}
