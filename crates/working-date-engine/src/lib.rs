//! # working-date-engine
//!
//! Deterministic business-calendar arithmetic.
//!
//! Given a start instant, a number of business days and a number of business
//! hours, the engine computes the resulting instant under a fixed regional
//! calendar: Monday to Friday, 08:00–12:00 and 13:00–17:00 at UTC-05:00
//! (Colombian civil time), excluding a supplied list of holidays.
//!
//! ## Modules
//!
//! - [`calendar`] — Work segments, business zone, and the immutable [`HolidayCalendar`]
//! - [`normalize`] — Backward adjustment to the nearest working instant
//! - [`days`] — Adding whole business days (time of day preserved)
//! - [`hours`] — Adding whole business hours across lunch, nights, weekends and holidays
//! - [`calculator`] — The full pipeline: normalize, add days, add hours, convert to UTC
//! - [`error`] — Error types

pub mod calculator;
pub mod calendar;
pub mod days;
pub mod error;
pub mod hours;
pub mod normalize;

pub use calculator::{compute, to_business_zone, to_reference_zone, WorkingDuration};
pub use calendar::{HolidayCalendar, WorkSegment, BUSINESS_OFFSET, WORK_SEGMENTS};
pub use days::add_business_days;
pub use error::WorkingDateError;
pub use hours::{add_business_hours, ForwardStep};
pub use normalize::{normalize_backward, BackwardStep};
