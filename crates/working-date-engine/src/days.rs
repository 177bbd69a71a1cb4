//! Adding whole business days.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::calendar::{self, HolidayCalendar};
use crate::error::{Result, WorkingDateError};

/// Advance `at` by `days` business days, keeping its time of day.
///
/// Each business day lands on the next working calendar date. Weekends and
/// holidays are skipped entirely. Zero days returns `at` unchanged.
///
/// Whole weeks are skipped arithmetically, so the cost grows with the number
/// of holidays crossed rather than with `days`. A target past the end of the
/// supported date range is an [`Overflow`](WorkingDateError::Overflow).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use working_date_engine::{add_business_days, HolidayCalendar};
///
/// // Friday 08:00 + 2 business days → Tuesday 08:00
/// let fri = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let tue = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// assert_eq!(add_business_days(fri, 2, &HolidayCalendar::new()).unwrap(), tue);
/// ```
pub fn add_business_days(
    at: NaiveDateTime,
    days: u32,
    calendar: &HolidayCalendar,
) -> Result<NaiveDateTime> {
    let time = at.time();
    let mut date = at.date();
    let mut steps = u64::from(days);

    // Five business days span seven calendar days, less any weekday holidays.
    // One week stays in the walk so weekend starts land correctly.
    let weeks = steps / 5;
    if weeks > 1 {
        let target = date
            .checked_add_days(Days::new(7 * (weeks - 1)))
            .ok_or_else(|| WorkingDateError::Overflow(format!("{days} business days after {at}")))?;
        let holidays = calendar.weekday_holidays_between(date, target) as u64;
        steps = steps - 5 * (weeks - 1) + holidays;
        date = target;
    }

    for _ in 0..steps {
        date = next_working_date(date, calendar)?;
    }
    Ok(date.and_time(time))
}

fn next_working_date(date: NaiveDate, calendar: &HolidayCalendar) -> Result<NaiveDate> {
    let mut date = calendar::succ(date)?;
    while !calendar.is_working_day(date) {
        date = calendar::succ(date)?;
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_zero_days_is_identity() {
        let t = at(2025, 8, 2, 3, 17); // even a Saturday is left alone
        assert_eq!(add_business_days(t, 0, &HolidayCalendar::new()).unwrap(), t);
    }

    #[test]
    fn test_one_day_midweek() {
        assert_eq!(
            add_business_days(at(2025, 8, 5, 10, 30), 1, &HolidayCalendar::new()).unwrap(),
            at(2025, 8, 6, 10, 30)
        );
    }

    #[test]
    fn test_friday_plus_one_is_monday() {
        assert_eq!(
            add_business_days(at(2025, 8, 1, 17, 0), 1, &HolidayCalendar::new()).unwrap(),
            at(2025, 8, 4, 17, 0)
        );
    }

    #[test]
    fn test_skips_holiday() {
        let cal = HolidayCalendar::build(["2025-08-07"]);
        // Wednesday + 1 → Friday, Thursday is a holiday
        assert_eq!(
            add_business_days(at(2025, 8, 6, 9, 0), 1, &cal).unwrap(),
            at(2025, 8, 8, 9, 0)
        );
    }

    #[test]
    fn test_holiday_monday_after_weekend() {
        let cal = HolidayCalendar::build(["2025-08-18"]);
        assert_eq!(
            add_business_days(at(2025, 8, 15, 12, 0), 1, &cal).unwrap(),
            at(2025, 8, 19, 12, 0)
        );
    }

    #[test]
    fn test_full_week() {
        assert_eq!(
            add_business_days(at(2025, 8, 4, 8, 0), 5, &HolidayCalendar::new()).unwrap(),
            at(2025, 8, 11, 8, 0)
        );
    }

    /// One calendar day at a time, no week skipping.
    fn step_by_step(at: NaiveDateTime, days: u32, cal: &HolidayCalendar) -> NaiveDateTime {
        let mut date = at.date();
        for _ in 0..days {
            date = next_working_date(date, cal).unwrap();
        }
        date.and_time(at.time())
    }

    #[test]
    fn test_week_skipping_matches_step_by_step() {
        let cal = HolidayCalendar::build([
            "2025-08-07", "2025-08-18", "2025-08-23", "2025-10-13", "2025-11-03",
            "2025-11-17", "2025-12-08", "2025-12-25",
        ]);
        let starts = [
            at(2025, 8, 1, 9, 0),   // Friday
            at(2025, 8, 2, 10, 0),  // Saturday
            at(2025, 8, 3, 11, 0),  // Sunday
            at(2025, 8, 6, 16, 0),  // Wednesday before a holiday
            at(2025, 8, 18, 8, 0),  // holiday Monday
        ];
        for start in starts {
            for n in 0..90 {
                assert_eq!(
                    add_business_days(start, n, &cal).unwrap(),
                    step_by_step(start, n, &cal),
                    "{start} + {n}"
                );
            }
        }
    }

    #[test]
    fn test_long_span_across_holidays() {
        let cal = HolidayCalendar::build(["2025-12-08", "2025-12-25"]);
        // Mon 2025-12-01 + 20 → four weeks plus two holidays → Wed 2025-12-31
        assert_eq!(
            add_business_days(at(2025, 12, 1, 8, 0), 20, &cal).unwrap(),
            at(2025, 12, 31, 8, 0)
        );
    }

    #[test]
    fn test_max_days_overflows_quickly() {
        let started = std::time::Instant::now();
        let result = add_business_days(at(2025, 8, 5, 8, 0), u32::MAX, &HolidayCalendar::new());
        assert!(matches!(result, Err(WorkingDateError::Overflow(_))));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}
