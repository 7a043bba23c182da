use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the calendar date of a maintenance record.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS`.
/// Timestamps keep the calendar date of their own offset; nothing is shifted
/// into the local zone, so the same input always lands in the same month.
pub fn parse_record_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }

    Err(anyhow!("Could not parse date: {}", input))
}
