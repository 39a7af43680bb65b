pub mod csv_sink;

pub use csv_sink::CsvReportSink;

use crate::error::SinkError;
use crate::models::RankedRow;

/// 报表输出端; 表头、样式、覆盖语义由实现负责
pub trait ReportSink: Send + Sync {
    fn write(&self, rows: &[RankedRow]) -> Result<(), SinkError>;

    /// 输出位置描述 (日志/接口返回用)
    fn target(&self) -> String;
}
