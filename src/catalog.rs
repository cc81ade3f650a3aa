/// Daylight-saving rule: the offset to use while DST is active, plus the
/// annual window as month/day labels (no year, e.g. "Mar 10").
#[derive(Debug, Clone, PartialEq)]
pub struct DstRule {
    pub offset_hours: f64,
    pub start_label: &'static str,
    pub end_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub standard_offset_hours: f64,
    pub dst: Option<DstRule>,
}

impl ZoneEntry {
    /// Offset label for display: "+5.5" for fractional offsets, otherwise
    /// an integer with an explicit sign ("+9", "-5", "+0").
    pub fn offset_label(&self) -> String {
        let h = self.standard_offset_hours;
        if h.fract() != 0.0 {
            format!("{:+}", h)
        } else {
            format!("{:+}", h as i64)
        }
    }
}

const fn fixed(id: &'static str, display_name: &'static str, offset: f64) -> ZoneEntry {
    ZoneEntry { id, display_name, standard_offset_hours: offset, dst: None }
}

const fn with_dst(
    id: &'static str,
    display_name: &'static str,
    offset: f64,
    dst_offset: f64,
    start: &'static str,
    end: &'static str,
) -> ZoneEntry {
    ZoneEntry {
        id,
        display_name,
        standard_offset_hours: offset,
        dst: Some(DstRule { offset_hours: dst_offset, start_label: start, end_label: end }),
    }
}

// Fixed catalog: UTC plus 8 cities/regions. Offsets are nominal, not IANA —
// the DST windows are crude fixed labels reapplied to the current year.
// Sydney's window crosses the year boundary, which the window check does not
// handle (see engine::in_dst_window).
static ZONES: [ZoneEntry; 9] = [
    fixed("utc", "UTC", 0.0),
    with_dst("london", "London", 0.0, 1.0, "Mar 31", "Oct 26"),
    with_dst("paris", "Paris", 1.0, 2.0, "Mar 31", "Oct 26"),
    with_dst("new_york", "New York", -5.0, -4.0, "Mar 10", "Nov 2"),
    with_dst("los_angeles", "Los Angeles", -8.0, -7.0, "Mar 10", "Nov 2"),
    fixed("dubai", "Dubai", 4.0),
    fixed("india", "India", 5.5),
    fixed("tokyo", "Tokyo", 9.0),
    with_dst("sydney", "Sydney", 10.0, 11.0, "Oct 6", "Apr 6"),
];

/// Look up a zone by id. Absence is not an error: callers skip rendering
/// entries whose zone id is unknown.
pub fn lookup(id: &str) -> Option<&'static ZoneEntry> {
    ZONES.iter().find(|z| z.id == id)
}

pub fn all() -> &'static [ZoneEntry] {
    &ZONES
}
