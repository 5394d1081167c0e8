//! Calendar parsing shared by the rate series and the market-share periods.

use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::cmp::Ordering;

/// Parses an observation date given either as an RFC 3339 timestamp or a plain
/// `YYYY-MM-DD` calendar date (taken as midnight UTC).
pub fn parse_observation_date(text: &str) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidDate(text.to_string()))
}

/// Serde adapter for `RateDataPoint::date`. Serializes as RFC 3339.
pub mod observation_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_observation_date(&text).map_err(serde::de::Error::custom)
    }
}

/// Chronological position of a reporting period such as `2025-01`, `2025-01-15`
/// or a full timestamp. Periods that cannot be read as dates keep their raw
/// text and sort after every dated period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodKey {
    Dated(NaiveDate, String),
    Undated(String),
}

impl PeriodKey {
    pub fn parse(period: &str) -> Self {
        let trimmed = period.trim();
        let date = parse_observation_date(trimmed)
            .map(|timestamp| timestamp.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok());

        match date {
            Some(date) => PeriodKey::Dated(date, period.to_string()),
            None => PeriodKey::Undated(period.to_string()),
        }
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Raw text breaks ties so distinct strings naming the same day stay distinct keys.
            (PeriodKey::Dated(a, a_raw), PeriodKey::Dated(b, b_raw)) => a.cmp(b).then_with(|| a_raw.cmp(b_raw)),
            (PeriodKey::Dated(..), PeriodKey::Undated(_)) => Ordering::Less,
            (PeriodKey::Undated(_), PeriodKey::Dated(..)) => Ordering::Greater,
            (PeriodKey::Undated(a), PeriodKey::Undated(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn plain_dates_are_midnight_utc() {
        let date = parse_observation_date("2025-03-07").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 3, 7));
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let date = parse_observation_date("2025-03-07T02:00:00+03:00").unwrap();
        assert_eq!(date.day(), 6);
        assert_eq!(date.hour(), 23);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_observation_date("last tuesday"),
            Err(CoreError::InvalidDate("last tuesday".to_string()))
        );
    }

    #[test]
    fn month_periods_sort_chronologically() {
        let mut keys: Vec<PeriodKey> = ["2025-10", "2025-02", "2024-12-31", "Q3", "2025-02-01T00:00:00Z"]
            .iter()
            .map(|p| PeriodKey::parse(p))
            .collect();
        keys.sort();

        let raw: Vec<&str> = keys
            .iter()
            .map(|k| match k {
                PeriodKey::Dated(_, raw) | PeriodKey::Undated(raw) => raw.as_str(),
            })
            .collect();
        assert_eq!(raw, vec!["2024-12-31", "2025-02", "2025-02-01T00:00:00Z", "2025-10", "Q3"]);
    }
}
