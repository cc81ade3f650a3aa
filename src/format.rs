use chrono::{NaiveDateTime, Timelike};

use crate::config::ClockSettings;

/// Formatting strategy for the values the engine produces. Built once from
/// config so tests can pin the format instead of depending on host locale.
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    pub hour_format: u8,
    pub date_format: String,
}

impl TimeFormatter {
    pub fn from_settings(settings: &ClockSettings) -> Self {
        Self {
            hour_format: settings.hour_format,
            date_format: settings.date_format.clone(),
        }
    }

    /// Short time: "5:30 AM" (12-hour, no leading zero on the hour) or
    /// "05:30" (24-hour).
    pub fn format_time(&self, local: NaiveDateTime) -> String {
        let hour = local.hour();
        if self.hour_format == 24 {
            format!("{:02}:{:02}", hour, local.minute())
        } else {
            let hour12 = if hour == 0 { 12 } else if hour > 12 { hour - 12 } else { hour };
            let suffix = if hour >= 12 { "PM" } else { "AM" };
            format!("{}:{:02} {}", hour12, local.minute(), suffix)
        }
    }

    /// Long date via the configured strftime string.
    pub fn format_date(&self, local: NaiveDateTime) -> String {
        local.format(&self.date_format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn formatter(hour_format: u8) -> TimeFormatter {
        TimeFormatter { hour_format, date_format: "%A, %d %B %Y".into() }
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn twelve_hour_times() {
        let f = formatter(12);
        assert_eq!(f.format_time(dt(5, 30)), "5:30 AM");
        assert_eq!(f.format_time(dt(0, 5)), "12:05 AM");
        assert_eq!(f.format_time(dt(12, 0)), "12:00 PM");
        assert_eq!(f.format_time(dt(23, 59)), "11:59 PM");
    }

    #[test]
    fn twenty_four_hour_times() {
        let f = formatter(24);
        assert_eq!(f.format_time(dt(5, 30)), "05:30");
        assert_eq!(f.format_time(dt(0, 5)), "00:05");
        assert_eq!(f.format_time(dt(23, 59)), "23:59");
    }

    #[test]
    fn long_date() {
        assert_eq!(formatter(12).format_date(dt(5, 30)), "Saturday, 01 June 2024");
    }
}
