//! Parses the publish dates carried by content documents.

use chrono::{DateTime, FixedOffset, NaiveDate, ParseResult, TimeZone};

/// Parses a document date. Accepts either a bare `YYYY-MM-DD` date, which is
/// interpreted as midnight UTC, or a full RFC 3339 timestamp.
pub fn parse(date: &str) -> ParseResult<DateTime<FixedOffset>> {
    let date = date.trim();
    match DateTime::parse_from_rfc3339(date) {
        Ok(date_time) => Ok(date_time),
        Err(_) => {
            // A bare date has no time or offset, so `DateTime` would reject
            // it. Pin it to midnight UTC.
            let naive_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
            Ok(FixedOffset::east(0).from_utc_datetime(&naive_date.and_hms(0, 0, 0)))
        }
    }
}
