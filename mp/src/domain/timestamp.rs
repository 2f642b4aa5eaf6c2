//! Display formatting for history timestamps

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Medium date plus short time, e.g. `Mar 1, 2025, 6:30 PM`
const DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Offset-less layouts the service has been seen to emit; read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a `created_at` value in the local time zone
///
/// Values that cannot be parsed are returned unchanged.
pub fn format_created_at(raw: &str) -> String {
    format_created_at_in(raw, &Local)
}

/// Format a `created_at` value in the given time zone
pub fn format_created_at_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => {
            debug!(%raw, "format_created_at_in: unparseable timestamp, showing raw value");
            raw.to_string()
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
