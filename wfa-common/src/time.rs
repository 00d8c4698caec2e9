//! Date formatting helpers for rendered pages

use chrono::{DateTime, Utc};

/// Long-form display date ("January 2, 2026")
pub fn format_display_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Machine-readable date for `<time datetime=...>` attributes
pub fn format_datetime_attr(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Parse an ISO-8601 / RFC 3339 timestamp from the content store
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> DateTime<Utc> {
        parse_iso("2026-01-02T09:30:00Z").unwrap()
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date(&sample_date()), "January 2, 2026");
    }

    #[test]
    fn test_format_datetime_attr() {
        assert_eq!(format_datetime_attr(&sample_date()), "2026-01-02T09:30:00Z");
    }

    #[test]
    fn test_parse_iso_with_offset() {
        let dt = parse_iso("2026-01-02T10:30:00+01:00").unwrap();
        assert_eq!(dt, sample_date());
    }

    #[test]
    fn test_parse_iso_invalid() {
        assert!(parse_iso("yesterday").is_none());
    }
}
