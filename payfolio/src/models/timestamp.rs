//! Serde helpers for backend timestamps.
//!
//! The backend emits naive UTC timestamps (`2024-05-01T10:00:00.123456`)
//! for most columns and RFC 3339 for a few. Both are accepted; output is
//! always RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse an RFC 3339 or naive (assumed UTC) timestamp.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

pub mod option {
    use super::{de, parse, DateTime, Deserialize, Deserializer, Serializer, Utc};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_naive_backend_timestamps_as_utc() {
        let parsed = parse("2024-05-01T10:30:00.123456").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.nanosecond(), 123_456_000);
    }

    #[test]
    fn parses_naive_timestamps_without_fraction() {
        let parsed = parse("2024-05-01T10:30:00").unwrap();
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
    }
}
