use crate::error::SinkError;
use crate::export::ReportSink;
use crate::models::RankedRow;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const HEADER: [&str; 4] = ["Brand", "SKU", "Title", "Quantity"];

/// CSV 报表输出
///
/// 先写同目录临时文件再 rename 覆盖目标, 失败时不留下半成品.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    path: PathBuf,
}

impl CsvReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 目标所在目录, 临时文件放在同一目录保证 rename 原子
    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn write_rows<W: Write>(out: W, rows: &[RankedRow]) -> Result<(), SinkError> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(HEADER)?;

        for row in rows {
            let quantity = row.entry.total_quantity.to_string();
            writer.write_record([
                row.entry.brand.as_str(),
                row.entry.sku.as_str(),
                row.entry.title.as_str(),
                quantity.as_str(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// 每次写出使用独立的临时文件, 并发写出互不干扰, 最后一次 rename 生效
    fn write_atomic(&self, rows: &[RankedRow]) -> Result<(), SinkError> {
        let mut tmp = NamedTempFile::new_in(self.target_dir())?;
        Self::write_rows(tmp.as_file_mut(), rows)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| SinkError::from(e.error))?;
        Ok(())
    }
}

impl ReportSink for CsvReportSink {
    fn write(&self, rows: &[RankedRow]) -> Result<(), SinkError> {
        let existed = self.path.exists();

        // 失败时 NamedTempFile drop 会删除临时文件
        if let Err(e) = self.write_atomic(rows) {
            tracing::error!("✗ Failed to write report {}: {}", self.path.display(), e);
            return Err(e);
        }

        if existed {
            tracing::info!("Existing report replaced: {}", self.path.display());
        }
        tracing::info!("✓ Report generated as '{}' ({} rows)", self.path.display(), rows.len());
        Ok(())
    }

    fn target(&self) -> String {
        self.path.display().to_string()
    }
}
