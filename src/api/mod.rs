pub mod handlers;

pub use handlers::*;

use crate::service::SellThroughService;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// 路由: 健康检查 + 报表生成
pub fn router(service: Arc<SellThroughService>) -> Router {
    let report_routes = Router::new()
        .route("/api/report/sell-through", post(sell_through))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(report_routes)
}
