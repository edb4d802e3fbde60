//! Conversions between domain values and their column representation.
//!
//! Timestamps are stored as RFC 3339 text with a fixed number of fractional
//! digits and a `Z` suffix, so lexical order in SQL matches time order.

use std::str::FromStr;

use chrono::SecondsFormat;

use tyrehub_domain::time::Timestamp;

pub(crate) fn encode_time(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_time(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse a text column into a domain enum through its `FromStr` impl.
pub(crate) fn decode_enum<T>(raw: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use tyrehub_domain::booking::BookingStatus;

    #[test]
    fn should_encode_with_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let fractional = whole + Duration::microseconds(1_500);
        assert_eq!(encode_time(whole), "2024-03-01T09:30:00.000000Z");
        assert_eq!(encode_time(fractional), "2024-03-01T09:30:00.001500Z");
        assert!(encode_time(whole) < encode_time(fractional));
    }

    #[test]
    fn should_decode_what_it_encodes() {
        let ts = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(decode_time(&encode_time(ts)).unwrap(), ts);
    }

    #[test]
    fn should_report_unknown_enum_value_as_decode_error() {
        let result = decode_enum::<BookingStatus>("ON_HOLD");
        assert!(matches!(result, Err(sqlx::Error::Decode(_))));
    }
}
