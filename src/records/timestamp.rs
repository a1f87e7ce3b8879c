use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time layouts with a numeric offset, with or without a colon (`+0000`, `+00:00`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-time layouts without any zone information, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the timestamp encodings SSC emits into a single comparable instant.
///
/// Accepted forms:
/// - `2024-01-15T10:30:00Z` and `2024-01-15T10:30:00.000Z`
/// - `2024-01-15T10:30:00.000+0000` and `2024-01-15T10:30:00+02:00`
/// - `2024-01-15T10:30:00` (taken as UTC)
/// - `2024-01-15` (midnight UTC)
///
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.to_utc());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.to_utc());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
