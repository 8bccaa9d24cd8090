use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Formats millisecond timestamps into axis and tooltip text under a fixed
/// UTC offset supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateFormatter {
    /// Offset east of UTC, in minutes.
    offset_minutes: i32,
}

impl DateFormatter {
    #[must_use]
    pub fn utc() -> Self {
        Self { offset_minutes: 0 }
    }

    /// Creates a formatter for a host-supplied UTC offset in minutes
    /// (east positive).
    pub fn with_offset_minutes(offset_minutes: i32) -> ChartResult<Self> {
        let Some(seconds) = offset_minutes.checked_mul(60) else {
            return Err(ChartError::Validation(format!(
                "utc offset {offset_minutes}min is out of range"
            )));
        };
        if FixedOffset::east_opt(seconds).is_none() {
            return Err(ChartError::Validation(format!(
                "utc offset {offset_minutes}min is out of range"
            )));
        }
        Ok(Self { offset_minutes })
    }

    #[must_use]
    pub fn offset_minutes(self) -> i32 {
        self.offset_minutes
    }

    /// Formats a timestamp as `"YYYY/M/D"` (month and day not padded).
    #[must_use]
    pub fn format_date(self, timestamp_ms: i64) -> String {
        let Some(dt) = self.local(timestamp_ms) else {
            return "invalid date".to_owned();
        };
        format!("{}/{}/{}", dt.year(), dt.month(), dt.day())
    }

    /// Formats a timestamp as zero-padded `"HH:MM:SS"`.
    #[must_use]
    pub fn format_time(self, timestamp_ms: i64) -> String {
        let Some(dt) = self.local(timestamp_ms) else {
            return "invalid time".to_owned();
        };
        format!("{:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second())
    }

    fn local(self, timestamp_ms: i64) -> Option<DateTime<FixedOffset>> {
        let offset =
            FixedOffset::east_opt(self.offset_minutes.checked_mul(60)?).unwrap_or_else(|| Utc.fix());
        DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.with_timezone(&offset))
    }
}

#[cfg(test)]
mod tests {
    use super::DateFormatter;

    // 2021-02-03 04:05:06 UTC
    const TS: i64 = 1_612_325_106_000;

    #[test]
    fn date_uses_one_based_month_without_padding() {
        assert_eq!(DateFormatter::utc().format_date(TS), "2021/2/3");
    }

    #[test]
    fn time_is_zero_padded() {
        assert_eq!(DateFormatter::utc().format_time(TS), "04:05:06");
    }

    #[test]
    fn offset_shifts_across_midnight() {
        let formatter = DateFormatter::with_offset_minutes(-300).expect("valid offset");
        assert_eq!(formatter.format_date(TS), "2021/2/2");
        assert_eq!(formatter.format_time(TS), "23:05:06");
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(DateFormatter::with_offset_minutes(24 * 60).is_err());
    }
}
