use sell_through_report::{api, AppConfig, SellThroughService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载 .env 与配置
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded environment from {}", path.display());
    }
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    if config.upstream.store_hash.is_empty() || config.upstream.api_token.is_empty() {
        tracing::warn!("API_HASH / API_TOKEN not configured, upstream requests will be rejected");
    }

    // 创建报表服务
    let service = Arc::new(SellThroughService::new(&config)?);

    let app = api::router(service).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /health");
    info!("  POST /api/report/sell-through  - Sell-through report ({})", config.report.output_path);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
