//! Cache timestamp codec.
//!
//! Timestamps are stored as `DD.MM.YYYY HH:MM:SS` in UTC at whole-second
//! precision.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// `chrono` format string for persisted timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Formats `at` for persistence.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a persisted timestamp.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `text` does not follow
/// [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

/// Drops sub-second precision so that a value survives persistence intact.
#[must_use]
pub fn to_stored_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}

/// Serde adapter for `#[serde(with = "...")]` fields.
pub mod serde_format {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    /// Serializes a timestamp in the cache format.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(*at))
    }

    /// Deserializes a timestamp in the cache format.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string in the cache format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_timestamp(&text).map_err(D::Error::custom)
    }
}
