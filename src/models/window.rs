use crate::error::InputError;
use chrono::{DateTime, Duration, Months, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

/// 报表时间窗口 [start, end], 构造后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InputError> {
        if start > end {
            return Err(InputError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// 上游 min_date_created 参数 (毫秒精度, Z 结尾)
    pub fn start_param(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// 上游 max_date_created 参数
    pub fn end_param(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// 预设区间, 结束时间均为 now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    PastWeek,
    PastMonth,
    PastQuarter,
    PastYear,
}

/// 已校验的窗口描述: 预设 或 自定义日期
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSpec {
    Preset(RangePreset),
    Custom { start: NaiveDate, end: NaiveDate },
}

impl WindowSpec {
    /// 解析调用方输入; custom 需要两个 DD/MM/YYYY 日期
    pub fn parse(
        range: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, InputError> {
        match range {
            "past week" => Ok(Self::Preset(RangePreset::PastWeek)),
            "past month" => Ok(Self::Preset(RangePreset::PastMonth)),
            "past quarter" => Ok(Self::Preset(RangePreset::PastQuarter)),
            "past year" => Ok(Self::Preset(RangePreset::PastYear)),
            "custom" => {
                let (Some(start), Some(end)) = (start_date, end_date) else {
                    return Err(InputError::MissingCustomDates);
                };
                Ok(Self::Custom {
                    start: parse_custom_date(start)?,
                    end: parse_custom_date(end)?,
                })
            }
            other => Err(InputError::UnknownRange(other.to_string())),
        }
    }

    /// 以 now 为基准解析为具体窗口
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateWindow, InputError> {
        let start = match self {
            Self::Preset(RangePreset::PastWeek) => now
                .checked_sub_signed(Duration::days(7))
                .ok_or_else(|| InputError::OutOfRange(format!("{now} - 7 days")))?,
            Self::Preset(RangePreset::PastMonth) => sub_months(now, 1)?,
            Self::Preset(RangePreset::PastQuarter) => sub_months(now, 3)?,
            Self::Preset(RangePreset::PastYear) => sub_months(now, 12)?,
            Self::Custom { start, end } => {
                return DateWindow::new(utc_midnight(*start)?, utc_midnight(*end)?);
            }
        };
        DateWindow::new(start, now)
    }
}

/// 日历月减法, 月末自动截断 (3/31 - 1 月 = 2/28 或 2/29)
fn sub_months(now: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, InputError> {
    now.checked_sub_months(Months::new(months))
        .ok_or_else(|| InputError::OutOfRange(format!("{now} - {months} months")))
}

fn parse_custom_date(input: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y")
        .map_err(|_| InputError::InvalidDate(input.to_string()))
}

fn utc_midnight(date: NaiveDate) -> Result<DateTime<Utc>, InputError> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| InputError::InvalidDate(date.to_string()))?;
    Ok(Utc.from_utc_datetime(&midnight))
}
