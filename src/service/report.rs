use crate::config::{AppConfig, UpstreamConfig};
use crate::error::{ReportError, UpstreamError};
use crate::export::{CsvReportSink, ReportSink};
use crate::models::{DateWindow, ReportStats, SellThroughReport, WindowSpec};
use crate::service::{
    rank, Aggregator, FanOut, LineItemResolver, LogProgress, OrderFetcher, ProgressObserver,
};
use crate::upstream::{BigCommerceClient, JsonFetcher, OrdersEndpoint};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 报表请求 (已校验)
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub brand: Option<String>,
    pub window: WindowSpec,
}

/// 销售报表服务
///
/// 分页拉取订单 -> 并发拉取明细 -> 单线程聚合 -> 排名 -> 写出.
pub struct SellThroughService {
    orders: OrderFetcher,
    fan_out: FanOut,
    sink: Arc<dyn ReportSink>,
    progress: Arc<dyn ProgressObserver>,
}

impl SellThroughService {
    pub fn new(config: &AppConfig) -> Result<Self, UpstreamError> {
        let client = BigCommerceClient::new(&config.upstream)?;
        let sink = CsvReportSink::new(&config.report.output_path);
        Self::with_fetcher(Arc::new(client), &config.upstream, Arc::new(sink))
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn JsonFetcher>,
        upstream: &UpstreamConfig,
        sink: Arc<dyn ReportSink>,
    ) -> Result<Self, UpstreamError> {
        let endpoint = OrdersEndpoint::new(&upstream.api_base, &upstream.store_hash, upstream.status_id)?;
        let orders = OrderFetcher::new(fetcher.clone(), endpoint, upstream.page_size, upstream.max_pages)?;
        let fan_out = FanOut::new(LineItemResolver::new(fetcher), upstream.concurrency);

        Ok(Self {
            orders,
            fan_out,
            sink,
            progress: Arc::new(LogProgress),
        })
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = progress;
        self
    }

    /// 核心流水线, 不写出; 任一上游失败整体失败
    pub async fn build_report(
        &self,
        window: &DateWindow,
        brand: Option<&str>,
    ) -> Result<SellThroughReport, UpstreamError> {
        // 1. 分页拉取全部订单 (必须先完成)
        let orders = self.orders.fetch_orders(window).await?;
        let order_count = orders.len();

        // 2. 并发拉取明细
        let pairs = self.fan_out.resolve_all(orders).await?;

        // 3. 聚合
        let aggregator = Aggregator::new(brand.map(str::to_string), self.progress.clone());
        let aggregate = aggregator.aggregate(&pairs);

        // 4. 排名
        let rows = rank(&aggregate);
        if !aggregate.conflicts().is_empty() {
            tracing::warn!(
                "{} SKU variants disagreed with the first seen brand/title of their SKU",
                aggregate.conflicts().len()
            );
        }

        Ok(SellThroughReport {
            orders: order_count,
            line_items: aggregate.line_items(),
            rows,
            conflicts: aggregate.conflicts().to_vec(),
        })
    }

    /// 完整流程: 解析窗口 -> 构建报表 -> 写出
    pub async fn generate(
        &self,
        request: &ReportRequest,
        now: DateTime<Utc>,
    ) -> Result<ReportStats, ReportError> {
        let window = request.window.resolve(now)?;
        tracing::info!(
            "Generating sell-through report: brand={:?}, window={} .. {}",
            request.brand,
            window.start_param(),
            window.end_param()
        );

        let report = self
            .build_report(&window, request.brand.as_deref())
            .await
            .inspect_err(|e| tracing::error!("Report aborted, nothing written: {}", e))?;

        self.sink.write(&report.rows)?;

        Ok(ReportStats {
            orders: report.orders,
            line_items: report.line_items,
            skus: report.rows.len(),
            total_quantity: report.total_quantity(),
            conflicts: report.conflicts,
            output: self.sink.target(),
        })
    }
}
