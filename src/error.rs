use chrono::{DateTime, Utc};
use thiserror::Error;

/// 时间窗口输入错误 (在任何网络请求之前返回)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid date range '{0}', expected one of: past week | past month | past quarter | past year | custom")]
    UnknownRange(String),

    #[error("invalid date format '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("custom range requires both start_date and end_date")]
    MissingCustomDates,

    #[error("window start {start} is after window end {end}")]
    InvertedWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("date arithmetic out of range: {0}")]
    OutOfRange(String),
}

/// 上游订单 API 错误 (整个报表终止, 不产生部分结果)
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream configuration: {0}")]
    Config(String),

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("order listing made no progress at page {page}")]
    NoProgress { page: u32 },

    #[error("order listing exceeded {max_pages} pages")]
    PageLimit { max_pages: u32 },

    #[error("line items for order {order_id}: {source}")]
    LineItems {
        order_id: u64,
        source: Box<UpstreamError>,
    },
}

/// 报表输出错误
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// 一次报表生成的最终错误
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
