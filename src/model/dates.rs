// src/model/dates.rs

//! Serde helpers for [`Timestamp`] fields.
//!
//! Plan files may write either a calendar date (`"2024-01-15"`, read as
//! midnight UTC) or a full RFC 3339 instant. Output is always RFC 3339.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use super::Timestamp;

/// Parse a date-only or RFC 3339 string into a UTC timestamp.
pub fn parse_timestamp(s: &str) -> Result<Timestamp, String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!(
        "invalid date '{s}' (expected YYYY-MM-DD or an RFC 3339 timestamp)"
    ))
}

pub fn serialize<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
