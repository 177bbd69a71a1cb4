//! Adding whole business hours.
//!
//! Hours are consumed only from work segments. The walk crosses the lunch
//! break, day ends, weekends and holidays by re-aligning forward to the next
//! segment start whenever it reaches a segment end.

use chrono::{Duration, NaiveDateTime};

use crate::calendar::{self, day_end, day_start, lunch_end, HolidayCalendar};
use crate::days::add_business_days;
use crate::error::{Result, WorkingDateError};

const HOURS_PER_WORKING_DAY: i64 = 8;

/// One forward alignment transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardStep {
    /// Non-working day, or at/after 17:00: 08:00 of the next working day.
    NextWorkingDayStart,
    /// Before 08:00 on a working day: 08:00 of the same day.
    SnapToDayStart,
    /// Inside lunch: 13:00 of the same day.
    SnapToAfternoonStart,
    /// Already inside a work segment.
    Stay,
}

/// Choose the forward alignment that applies at `at`.
pub fn next_forward_step(at: NaiveDateTime, calendar: &HolidayCalendar) -> ForwardStep {
    let time = at.time();
    if !calendar.is_working_day(at.date()) || time >= day_end() {
        ForwardStep::NextWorkingDayStart
    } else if time < day_start() {
        ForwardStep::SnapToDayStart
    } else if calendar::is_lunch(time) {
        ForwardStep::SnapToAfternoonStart
    } else {
        ForwardStep::Stay
    }
}

/// Apply a single forward alignment. The result always lies inside a work
/// segment of a working day.
pub fn apply_forward_step(
    step: ForwardStep,
    at: NaiveDateTime,
    calendar: &HolidayCalendar,
) -> Result<NaiveDateTime> {
    match step {
        ForwardStep::NextWorkingDayStart => calendar.next_working_day_start(at),
        ForwardStep::SnapToDayStart => Ok(at.date().and_time(day_start())),
        ForwardStep::SnapToAfternoonStart => Ok(at.date().and_time(lunch_end())),
        ForwardStep::Stay => Ok(at),
    }
}

fn align_forward(at: NaiveDateTime, calendar: &HolidayCalendar) -> Result<NaiveDateTime> {
    apply_forward_step(next_forward_step(at, calendar), at, calendar)
}

/// Advance `at` by `hours` working hours.
///
/// The result may land exactly on a segment end (12:00 or 17:00) when the
/// hours run out there; it never lands inside the lunch break. Zero hours
/// returns `at` unchanged.
///
/// Only whole hours are taken from a segment. A sub-hour tail before a
/// segment end is dropped when the walk moves on, so 11:30 + 1h is 14:00 and
/// 08:30 + 4h is 14:00.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use working_date_engine::{add_business_hours, HolidayCalendar};
///
/// // Friday 16:00 + 2h → Monday 09:00
/// let fri = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap().and_hms_opt(16, 0, 0).unwrap();
/// let mon = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(add_business_hours(fri, 2, &HolidayCalendar::new()).unwrap(), mon);
/// ```
pub fn add_business_hours(
    at: NaiveDateTime,
    hours: u32,
    calendar: &HolidayCalendar,
) -> Result<NaiveDateTime> {
    if hours == 0 {
        return Ok(at);
    }

    let mut remaining = i64::from(hours);
    let mut current = at;
    loop {
        current = align_forward(current, calendar)?;

        // Skip whole working days in one go, leaving at least one hour of work.
        if current.time() == day_start() && remaining > HOURS_PER_WORKING_DAY {
            let full_days = (remaining - 1) / HOURS_PER_WORKING_DAY;
            let skip = u32::try_from(full_days)
                .map_err(|_| WorkingDateError::Overflow(format!("{hours} hours")))?;
            current = add_business_days(current, skip, calendar)?;
            remaining -= full_days * HOURS_PER_WORKING_DAY;
        }

        let segment = calendar::segment_at(current.time()).ok_or_else(|| {
            WorkingDateError::InvalidDatetime(format!("{current} is outside working hours"))
        })?;
        let segment_end = current.date().and_time(segment.end());
        let available = (segment_end - current).num_hours();

        if available >= remaining {
            return Ok(current + Duration::hours(remaining));
        }
        remaining -= available;
        current = segment_end;
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
