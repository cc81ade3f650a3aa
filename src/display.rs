use chrono::{DateTime, Utc};

use crate::catalog;
use crate::engine;
use crate::favorites::FavoriteCity;
use crate::format::TimeFormatter;

/// Render one card per favorite city. Every card in a cycle is computed from
/// the same reference instant so the displayed clocks never skew against each
/// other. A favorite whose zone id is missing from the catalog is skipped.
pub fn render_board(
    favorites: &[FavoriteCity],
    reference: DateTime<Utc>,
    formatter: &TimeFormatter,
    show_date: bool,
) -> String {
    let mut out = String::new();

    if favorites.is_empty() {
        out.push_str("No favorite cities yet.\n");
        out.push_str("Add one with: zonewatch ctl add <name> <zone>\n");
        return out;
    }

    for city in favorites {
        let Some(entry) = catalog::lookup(&city.time_zone_id) else {
            log::debug!("Skipping {}: unknown zone id {:?}", city.name, city.time_zone_id);
            continue;
        };
        let zone_time = engine::local_time_for(entry, reference);
        let dst_marker = if zone_time.dst_active { " DST" } else { "" };

        out.push_str(&format!(
            "{:<18} {:>8}  {} (UTC{}){}\n",
            city.name,
            formatter.format_time(zone_time.local),
            entry.display_name,
            entry.offset_label(),
            dst_marker,
        ));
        if show_date {
            out.push_str(&format!("{:<18} {}\n", "", formatter.format_date(zone_time.local)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn formatter() -> TimeFormatter {
        TimeFormatter { hour_format: 12, date_format: "%A, %d %B %Y".into() }
    }

    fn city(name: &str, zone: &str) -> FavoriteCity {
        FavoriteCity { id: name.to_lowercase(), name: name.into(), time_zone_id: zone.into() }
    }

    #[test]
    fn renders_india_vector() {
        let reference = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let board = render_board(&[city("Mumbai", "india")], reference, &formatter(), true);
        assert!(board.contains("Mumbai"));
        assert!(board.contains("5:30 AM"));
        assert!(board.contains("UTC+5.5"));
        assert!(board.contains("Saturday, 01 June 2024"));
    }

    #[test]
    fn unknown_zone_is_silently_skipped() {
        let reference = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let favorites = [city("Ghost", "atlantis"), city("Mumbai", "india")];
        let board = render_board(&favorites, reference, &formatter(), false);
        assert!(!board.contains("Ghost"));
        assert!(board.contains("Mumbai"));
    }

    #[test]
    fn dst_marker_shown_when_active() {
        let reference = Utc.with_ymd_and_hms(2024, 7, 4, 16, 0, 0).unwrap();
        let board = render_board(&[city("HQ", "new_york")], reference, &formatter(), false);
        assert!(board.contains(" DST"));

        let winter = Utc.with_ymd_and_hms(2024, 1, 20, 16, 0, 0).unwrap();
        let board = render_board(&[city("HQ", "new_york")], winter, &formatter(), false);
        assert!(!board.contains(" DST"));
    }

    #[test]
    fn empty_board_shows_hint() {
        let reference = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let board = render_board(&[], reference, &formatter(), true);
        assert!(board.contains("No favorite cities"));
    }
}
