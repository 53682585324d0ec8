//! Calendar-date helpers shared by the server and the data gateway.
//!
//! Dates travel as `YYYY-MM-DD`. Decoding accepts RFC 3339 timestamps and naive
//! `YYYY-MM-DDTHH:MM:SS[.fff]` values too, keeping only the calendar date as written.
//! No timezone conversion is applied.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date in any of the accepted shapes. Blank or unrecognised input yields `None`.
pub fn parse_lenient(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    None
}

/// `today + months`, clamping to the last day of the target month (Nov 30 + 3 -> Feb 28/29).
pub fn add_months(today: NaiveDate, months: u32) -> NaiveDate {
    today.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}

fn serialize_opt<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => s.serialize_none(),
    }
}

/// Tolerant codec for data read back from the server: garbage decodes as `None`.
pub mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        serialize_opt(value, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_lenient))
    }
}

/// Codec for user input: null or blank means "not given", anything unparseable is an error.
pub mod optional {
    use super::*;
    use serde::de::Error;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        serialize_opt(value, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_lenient(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}"))),
        }
    }
}

/// Codec for a date the caller may clear. Pair with `#[serde(default)]`: an absent field
/// stays `None`, while null or blank decodes as `Some(None)`.
pub mod nullable {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Option<NaiveDate>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => serialize_opt(inner, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<NaiveDate>>, D::Error> {
        optional::deserialize(d).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_plain_and_timestamp_forms() {
        assert_eq!(parse_lenient("2025-03-01"), Some(d(2025, 3, 1)));
        assert_eq!(parse_lenient("2025-03-01T00:00:00.000Z"), Some(d(2025, 3, 1)));
        assert_eq!(parse_lenient("2025-03-01T23:30:00+02:00"), Some(d(2025, 3, 1)));
        assert_eq!(parse_lenient("2025-03-01T10:15:00"), Some(d(2025, 3, 1)));
        assert_eq!(parse_lenient("  "), None);
        assert_eq!(parse_lenient("next tuesday"), None);
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(add_months(d(2025, 11, 30), 3), d(2026, 2, 28));
        assert_eq!(add_months(d(2025, 1, 15), 3), d(2025, 4, 15));
    }

    #[derive(serde::Deserialize)]
    struct Input {
        #[serde(default, with = "optional")]
        when: Option<NaiveDate>,
    }

    #[test]
    fn optional_codec_rejects_garbage_but_accepts_blank() {
        let ok: Input = serde_json::from_str(r#"{"when":""}"#).unwrap();
        assert_eq!(ok.when, None);
        let ok: Input = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(ok.when, None);
        let ok: Input = serde_json::from_str(r#"{"when":"2024-02-29"}"#).unwrap();
        assert_eq!(ok.when, Some(d(2024, 2, 29)));
        assert!(serde_json::from_str::<Input>(r#"{"when":"2024-02-30"}"#).is_err());
    }

    #[derive(serde::Deserialize, serde::Serialize)]
    struct Patch {
        #[serde(default, with = "nullable", skip_serializing_if = "Option::is_none")]
        when: Option<Option<NaiveDate>>,
    }

    #[test]
    fn nullable_codec_tells_absent_from_null() {
        let p: Patch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.when, None);
        let p: Patch = serde_json::from_str(r#"{"when":null}"#).unwrap();
        assert_eq!(p.when, Some(None));
        let p: Patch = serde_json::from_str(r#"{"when":""}"#).unwrap();
        assert_eq!(p.when, Some(None));
        let p: Patch = serde_json::from_str(r#"{"when":"2025-07-01"}"#).unwrap();
        assert_eq!(p.when, Some(Some(d(2025, 7, 1))));
        assert!(serde_json::from_str::<Patch>(r#"{"when":"soon"}"#).is_err());

        assert_eq!(serde_json::to_string(&Patch { when: Some(None) }).unwrap(), r#"{"when":null}"#);
        assert_eq!(serde_json::to_string(&Patch { when: None }).unwrap(), "{}");
    }
}
