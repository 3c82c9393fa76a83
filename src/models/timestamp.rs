//! Lenient ISO-8601 input for user-supplied dates
//!
//! Accepts full RFC 3339 timestamps, offset-less date-times and plain
//! `YYYY-MM-DD` dates. Values without an offset are read as UTC, a bare date
//! as midnight UTC. Serialization is left to chrono's RFC 3339 output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

/// Parse one ISO-8601 date or date-time
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| invalid::<D>(&raw))
}

pub fn deserialize_option<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse(&raw).map(Some).ok_or_else(|| invalid::<D>(&raw)),
        None => Ok(None),
    }
}

fn invalid<'de, D: Deserializer<'de>>(raw: &str) -> D::Error {
    de::Error::custom(format!("'{}' is not an ISO-8601 date or date-time", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only_is_midnight_utc() {
        assert_eq!(
            parse("2025-01-10"),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_full_timestamps() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 10, 18, 30, 0).unwrap();
        assert_eq!(parse("2025-01-10T18:30:00Z"), Some(expected));
        assert_eq!(parse("2025-01-10T18:30:00.000Z"), Some(expected));
        assert_eq!(parse("2025-01-10T20:30:00+02:00"), Some(expected));
        assert_eq!(parse("2025-01-10T18:30:00"), Some(expected));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("next tuesday"), None);
        assert_eq!(parse("2025-13-01"), None);
        assert_eq!(parse("2025-01-10T"), None);
    }
}
