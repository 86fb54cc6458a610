//! Date helper functions

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a publication date as delivered by the CMS.
///
/// The field is an ISO-8601 string; date-only values are pinned to midnight
/// UTC.
pub fn parse_publication_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    None
}

/// Format a date the way the pages display it: `M/D/YYYY` without leading
/// zeros, e.g. `1/1/2024`.
pub fn display_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
