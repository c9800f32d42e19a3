//! Serde-хелпер для временных меток каталога.
//!
//! Источник данных не гарантирует единый формат, поэтому принимаются:
//! - RFC 3339 (`2024-03-15T14:02:26Z`, `2024-03-15T14:02:26.123+03:00`)
//! - дата-время без зоны (`2024-03-15T14:02:26`), трактуется как UTC
//! - только дата (`2024-03-15`), полночь UTC
//!
//! При сериализации всегда пишется RFC 3339.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Разбирает временную метку в одном из поддерживаемых форматов.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(parse_timestamp("2024-03-15T14:02:26Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15T17:02:26+03:00"), Some(expected));
    }

    #[test]
    fn test_parse_naive_and_date_only() {
        assert_eq!(
            parse_timestamp("2024-03-15T14:02:26"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-03-15"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_timestamp("15.03.2024"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
