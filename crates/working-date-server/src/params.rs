//! Validation of `days`, `hours` and `date` request parameters.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use working_date_engine::WorkingDuration;

use crate::error::ApiError;

/// Query parameters exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    pub days: Option<String>,
    pub hours: Option<String>,
    pub date: Option<String>,
}

/// A validated request: an optional start instant and at least one count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingDateQuery {
    pub start: Option<DateTime<Utc>>,
    pub duration: WorkingDuration,
}

pub fn parse_query(raw: &RawQuery) -> Result<WorkingDateQuery, ApiError> {
    let days = raw.days.as_deref().map(|v| parse_count("days", v)).transpose()?;
    let hours = raw.hours.as_deref().map(|v| parse_count("hours", v)).transpose()?;
    let duration = WorkingDuration::new(days, hours);
    if duration.is_unspecified() {
        return Err(ApiError::invalid(
            "at least one of 'days' or 'hours' must be provided",
        ));
    }
    let start = raw.date.as_deref().map(parse_utc_instant).transpose()?;
    Ok(WorkingDateQuery { start, duration })
}

/// Parse a non-negative whole number. Signs, fractions and blanks are rejected.
fn parse_count(name: &str, value: &str) -> Result<u32, ApiError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::invalid(format!(
            "'{name}' must be a non-negative integer, got '{value}'"
        )));
    }
    value
        .parse::<u32>()
        .map_err(|_| ApiError::invalid(format!("'{name}' is too large: {value}")))
}

/// Parse an ISO 8601 instant that carries an explicit `Z` designator.
fn parse_utc_instant(value: &str) -> Result<DateTime<Utc>, ApiError> {
    let invalid = || {
        ApiError::invalid(format!(
            "'date' must be an ISO 8601 UTC instant ending in 'Z', got '{value}'"
        ))
    };
    if !value.ends_with(['Z', 'z']) {
        return Err(invalid());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid())
}

// ── Tests ───────────────────────────────────────────────────────────────────
