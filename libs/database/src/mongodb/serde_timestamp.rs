//! Store `DateTime<Utc>` as fixed-width RFC 3339 strings.
//!
//! chrono's default serializer trims trailing zero nanoseconds, so two
//! timestamps in the same second can compare out of order as strings. Fixing
//! the precision at milliseconds keeps string order equal to time order, which
//! is what `sort({ createdAt: -1 })` relies on.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// The stored string form, for building `$set` documents by hand.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(D::Error::custom)
}
