//! Time and localized date formatting utilities

use chrono::{DateTime, Locale, Utc};

/// French display pattern, 24-hour clock
const FRENCH_PATTERN: &str = "%A %d %B %Y à %H:%M";

/// Default display pattern, 12-hour clock; the meridiem is appended
/// separately so its locale can be picked per call
const DEFAULT_PATTERN: &str = "%A %d %B %Y, %I:%M";

/// Current time as milliseconds since the Unix epoch
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a timestamp for display in the given language.
///
/// `"fr"` selects the French pattern (24-hour clock, no meridiem).
/// Any other value falls back to the default pattern; the language is
/// resolved to a known locale when possible, otherwise day and month
/// names render in POSIX English. Locales that define no meridiem
/// strings borrow the POSIX `AM`/`PM` marker.
pub fn format_timestamp(timestamp: DateTime<Utc>, language: &str) -> String {
    if language == "fr" {
        return timestamp
            .format_localized(FRENCH_PATTERN, Locale::fr_FR)
            .to_string();
    }

    let locale = Locale::try_from(language).unwrap_or(Locale::POSIX);
    let mut meridiem = timestamp.format_localized("%p", locale).to_string();
    if meridiem.is_empty() {
        // Locales like de_DE ship empty AM/PM strings
        meridiem = timestamp.format_localized("%p", Locale::POSIX).to_string();
    }

    format!(
        "{} {}",
        timestamp.format_localized(DEFAULT_PATTERN, locale),
        meridiem
    )
}

/// Render an epoch-milliseconds timestamp for display.
///
/// Values outside the representable range yield `"Invalid Date"`.
pub fn format_epoch_millis(millis: i64, language: &str) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(timestamp) => format_timestamp(timestamp, language),
        None => "Invalid Date".to_string(),
    }
}

/// Render an ISO 8601 timestamp string for display.
///
/// Unparseable input yields `"Invalid Date"`.
pub fn format_iso(s: &str, language: &str) -> String {
    match parse_datetime(s) {
        Some(timestamp) => format_timestamp(timestamp, language),
        None => "Invalid Date".to_string(),
    }
}

/// Parse a datetime string in ISO 8601 format
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
