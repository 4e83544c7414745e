//! Zone-less ISO-8601 timestamps as sent by clients.
//!
//! Accepts `YYYY-MM-DDTHH:MM:SS[.fff]` as well as the minute-precision form
//! produced by `<input type="datetime-local">`.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};

const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_local(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid date-time '{raw}', expected YYYY-MM-DDTHH:MM:SS"
        ))
    })
}
