//! Calendar date parsing and formatting

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts tried in order
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Date-only layouts, resolved to midnight
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y"];

/// Parse a date string in various formats
///
/// Offsets are normalized to UTC. Anything unrecognized yields `None`.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }

    None
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    // A literal `%` must not reach chrono as a specifier
    let mut result = format.replace('%', "%%");

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_date_string("2024-01-01"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_date_string("2024/03/09"), Some(ymd(2024, 3, 9)));
        assert_eq!(parse_date_string(" 2023-03-01 "), Some(ymd(2023, 3, 1)));
        assert_eq!(parse_date_string("June 1, 2025"), Some(ymd(2025, 6, 1)));
    }

    #[test]
    fn test_parse_datetime() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let dt = parse_date_string("2024-01-15T10:30:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");
    }

    #[test]
    fn test_parse_with_offset_is_utc() {
        let dt = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 08:30");
    }

    #[test]
    fn test_unparsable_dates() {
        assert_eq!(parse_date_string(""), None);
        assert_eq!(parse_date_string("not a date"), None);
        assert_eq!(parse_date_string("2024-13-40"), None);
    }

    #[test]
    fn test_format_date() {
        let date = ymd(2024, 1, 15);
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "MMM DD, YYYY"), "Jan 15, 2024");
    }

    #[test]
    fn test_format_date_with_literal_percent() {
        let date = parse_date_string("2024-01-15").unwrap();
        assert_eq!(format_date(&date, "YYYY 100% done"), "2024 100% done");
        assert_eq!(format_date(&date, "%Y"), "%Y");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("DD%"), "%d%%");
    }
}
