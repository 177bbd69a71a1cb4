//! Backward normalization to the nearest working instant.
//!
//! A business-zone wall-clock time is walked backwards through a fixed set of
//! transitions until it rests inside a work segment or on one of the landing
//! boundaries (12:00 or 17:00). Normalization never moves a moment forward.

use chrono::NaiveDateTime;

use crate::calendar::{self, day_end, day_start, lunch_start, HolidayCalendar};
use crate::error::Result;

/// One transition of the backward walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackwardStep {
    /// Non-working day, or before 08:00: go to 17:00 of the previous calendar day.
    PreviousDayEnd,
    /// At or after 17:00: clamp to 17:00 of the same day.
    ClampToDayEnd,
    /// Inside lunch: clamp to 12:00 of the same day.
    ClampToLunchStart,
    /// Already inside a work segment.
    Stay,
}

impl BackwardStep {
    /// Whether the walk stops after applying this step.
    pub fn is_terminal(self) -> bool {
        !matches!(self, BackwardStep::PreviousDayEnd)
    }
}

/// Choose the transition that applies at `at`.
pub fn next_backward_step(at: NaiveDateTime, calendar: &HolidayCalendar) -> BackwardStep {
    let time = at.time();
    if !calendar.is_working_day(at.date()) || time < day_start() {
        BackwardStep::PreviousDayEnd
    } else if time >= day_end() {
        BackwardStep::ClampToDayEnd
    } else if calendar::is_lunch(time) {
        BackwardStep::ClampToLunchStart
    } else {
        BackwardStep::Stay
    }
}

/// Apply a single transition.
pub fn apply_backward_step(step: BackwardStep, at: NaiveDateTime) -> Result<NaiveDateTime> {
    Ok(match step {
        BackwardStep::PreviousDayEnd => calendar::pred(at.date())?.and_time(day_end()),
        BackwardStep::ClampToDayEnd => at.date().and_time(day_end()),
        BackwardStep::ClampToLunchStart => at.date().and_time(lunch_start()),
        BackwardStep::Stay => at,
    })
}

/// Move `at` back to the nearest working instant at or before it.
///
/// `at` is a wall-clock time in the business zone. Every non-terminal step
/// moves to an earlier calendar date, so the walk always terminates.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use working_date_engine::{normalize_backward, HolidayCalendar};
///
/// // Saturday 10:00 → Friday 17:00
/// let sat = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let fri = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap().and_hms_opt(17, 0, 0).unwrap();
/// assert_eq!(normalize_backward(sat, &HolidayCalendar::new()).unwrap(), fri);
/// ```
pub fn normalize_backward(at: NaiveDateTime, calendar: &HolidayCalendar) -> Result<NaiveDateTime> {
    let mut current = at;
    loop {
        let step = next_backward_step(current, calendar);
        current = apply_backward_step(step, current)?;
        if step.is_terminal() {
            return Ok(current);
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
