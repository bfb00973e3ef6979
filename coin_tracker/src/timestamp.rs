//! Storage encoding for instants.
//!
//! All database timestamps are RFC 3339 UTC strings with exactly three
//! fractional digits and a `Z` suffix (`2024-03-10T14:30:00.000Z`). The fixed
//! width makes lexical comparison in SQL agree with chronological order, which
//! the range query depends on.

use chrono::{DateTime, SecondsFormat, Utc};

/// Encodes an instant for storage.
pub fn encode(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decodes a stored timestamp. Accepts any RFC 3339 offset and converts to UTC.
pub fn decode(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}
