//! Calendar date handling for backend payloads.
//!
//! The backend stores dates as timestamps and sends them either as
//! `YYYY-MM-DD` or as full ISO-8601 strings (`2026-01-15T00:00:00.000Z`).
//! The helpers here accept both and always write `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a date from either a plain date or an ISO-8601 timestamp.
///
/// Timestamps keep the calendar date they were written with.
///
/// ```
/// use payroll_engine::models::parse_iso_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(parse_iso_date("2026-01-15"), Some(expected));
/// assert_eq!(parse_iso_date("2026-01-15T00:00:00.000Z"), Some(expected));
/// assert_eq!(parse_iso_date("15/01/2026"), None);
/// ```
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

/// Serde module for required dates: `#[serde(with = "iso_date")]`.
pub mod iso_date {
    use super::*;

    /// Writes the date as `YYYY-MM-DD`.
    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    /// Reads a plain date or ISO timestamp; anything else is an error.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_iso_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

/// Serde module for optional dates: `#[serde(default, with = "iso_date_opt")]`.
///
/// Missing, `null`, empty or unparseable values read as `None`.
pub mod iso_date_opt {
    use super::*;

    /// Writes the date as `YYYY-MM-DD`, or `null`.
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    /// Reads an optional date leniently.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_iso_date))
    }
}
