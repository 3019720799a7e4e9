//! Timestamp utilities
//!
//! All timestamps are persisted as RFC 3339 text in UTC with a fixed
//! microsecond precision so that lexical order matches chronological order.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::{Error, Result};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current calendar day (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a timestamp for storage
pub fn to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
pub fn from_db(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Corrupt(format!("invalid timestamp '{}': {}", s, e)))
}

/// Format a calendar date for storage (YYYY-MM-DD)
pub fn date_to_db(day: &NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse a stored calendar date (YYYY-MM-DD)
pub fn date_from_db(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| Error::Corrupt(format!("invalid date '{}': {}", s, e)))
}

/// Start of the given day as a UTC timestamp
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Last microsecond of the given day as a UTC timestamp
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day) + Duration::days(1) - Duration::microseconds(1)
}
