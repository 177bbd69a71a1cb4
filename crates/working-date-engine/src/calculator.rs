//! Pipeline composing normalization, day addition and hour addition.
//!
//! All functions take explicit inputs and never read the system clock: the
//! caller supplies the start instant ("now" if the request had none) and an
//! already-resolved [`HolidayCalendar`].

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::calendar::{HolidayCalendar, BUSINESS_OFFSET};
use crate::days::add_business_days;
use crate::error::{Result, WorkingDateError};
use crate::hours::add_business_hours;
use crate::normalize::normalize_backward;

/// An amount of business time to add. Days are always applied before hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingDuration {
    pub days: Option<u32>,
    pub hours: Option<u32>,
}

impl WorkingDuration {
    pub fn new(days: Option<u32>, hours: Option<u32>) -> Self {
        Self { days, hours }
    }

    pub fn days(days: u32) -> Self {
        Self::new(Some(days), None)
    }

    pub fn hours(hours: u32) -> Self {
        Self::new(None, Some(hours))
    }

    /// Whether neither a day count nor an hour count was given.
    pub fn is_unspecified(&self) -> bool {
        self.days.is_none() && self.hours.is_none()
    }
}

/// Wall-clock time of `instant` in the business zone.
pub fn to_business_zone(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&BUSINESS_OFFSET).naive_local()
}

/// The UTC instant of a business-zone wall-clock time.
pub fn to_reference_zone(local: NaiveDateTime) -> Result<DateTime<Utc>> {
    BUSINESS_OFFSET
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            WorkingDateError::InvalidDatetime(format!(
                "'{local}' has no UTC instant at offset {BUSINESS_OFFSET}"
            ))
        })
}

/// Add business days and hours to `start`.
///
/// `start` is first moved back to the nearest working instant, then days are
/// added, then hours. The result is expressed in UTC.
///
/// # Errors
///
/// Returns [`WorkingDateError::Overflow`] if the result falls outside the
/// representable date range.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use working_date_engine::{compute, HolidayCalendar, WorkingDuration};
///
/// // Friday 2025-08-01 08:00 Bogota (13:00 UTC) + 1 day + 1 hour → Monday 09:00 Bogota
/// let start = Utc.with_ymd_and_hms(2025, 8, 1, 13, 0, 0).unwrap();
/// let result = compute(start, WorkingDuration::new(Some(1), Some(1)), &HolidayCalendar::new()).unwrap();
/// assert_eq!(result, Utc.with_ymd_and_hms(2025, 8, 4, 14, 0, 0).unwrap());
/// ```
pub fn compute(
    start: DateTime<Utc>,
    duration: WorkingDuration,
    calendar: &HolidayCalendar,
) -> Result<DateTime<Utc>> {
    let mut local = normalize_backward(to_business_zone(start), calendar)?;
    if let Some(days) = duration.days {
        local = add_business_days(local, days, calendar)?;
    }
    if let Some(hours) = duration.hours {
        local = add_business_hours(local, hours, calendar)?;
    }
    to_reference_zone(local)
}

// ── Tests ───────────────────────────────────────────────────────────────────
