//! The fixed regional business calendar.
//!
//! Work happens Monday to Friday in two segments, 08:00–12:00 and 13:00–17:00,
//! evaluated in the business zone, Colombian civil time at a fixed UTC-05:00
//! offset.
//! Holidays come from an externally supplied list and are held in an immutable
//! [`HolidayCalendar`] for the duration of one computation.

use std::collections::BTreeSet;
use std::ops::Bound;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{Result, WorkingDateError};

/// The offset in which all working-day and working-hour rules apply (UTC-05:00).
///
/// Held fixed for every instant, including the 1992–93 period when Colombia
/// briefly observed daylight saving time.
pub const BUSINESS_OFFSET: FixedOffset = match FixedOffset::west_opt(5 * 3600) {
    Some(offset) => offset,
    None => panic!("UTC-05:00 is a valid offset"),
};

// ── Work segments ───────────────────────────────────────────────────────────

/// One contiguous working window within a day, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSegment {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkSegment {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn start(&self) -> NaiveTime {
        hour(self.start_hour)
    }

    pub fn end(&self) -> NaiveTime {
        hour(self.end_hour)
    }

    /// Whether `time` lies inside the segment (end exclusive).
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start() && time < self.end()
    }
}

/// Morning segment, 08:00–12:00.
pub const MORNING: WorkSegment = WorkSegment::new(8, 12);

/// Afternoon segment, 13:00–17:00.
pub const AFTERNOON: WorkSegment = WorkSegment::new(13, 17);

/// The working segments of every working day, sorted and non-overlapping.
pub const WORK_SEGMENTS: [WorkSegment; 2] = [MORNING, AFTERNOON];

/// Start of the working day (08:00).
pub fn day_start() -> NaiveTime {
    MORNING.start()
}

/// End of the working day (17:00).
pub fn day_end() -> NaiveTime {
    AFTERNOON.end()
}

/// Start of the lunch break (12:00).
pub fn lunch_start() -> NaiveTime {
    MORNING.end()
}

/// End of the lunch break (13:00).
pub fn lunch_end() -> NaiveTime {
    AFTERNOON.start()
}

/// Whether `time` falls in the lunch window `[12:00, 13:00)`.
pub fn is_lunch(time: NaiveTime) -> bool {
    time >= lunch_start() && time < lunch_end()
}

/// The working segment containing `time`, if any.
pub fn segment_at(time: NaiveTime) -> Option<WorkSegment> {
    WORK_SEGMENTS.iter().copied().find(|s| s.contains(time))
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}

// ── HolidayCalendar ─────────────────────────────────────────────────────────

/// An immutable set of holiday dates in the business zone.
///
/// Membership is a pure function of the civil date. An empty calendar means
/// no holidays are known, so every weekday is a working day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// An empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a calendar from raw date-like strings.
    ///
    /// Parsing is lenient: `"2025-12-25"`, `"2025-12-25T00:00:00Z"` and
    /// `"2025-12-25 08:00:00-05:00"` all yield December 25th. Any time-of-day or
    /// zone suffix is discarded without conversion. Entries that do not start
    /// with a `YYYY-MM-DD` date are dropped silently.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use working_date_engine::HolidayCalendar;
    ///
    /// let cal = HolidayCalendar::build(["2025-12-25T05:00:00.000Z", "not a date"]);
    /// assert_eq!(cal.len(), 1);
    /// assert!(cal.contains(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
    /// ```
    pub fn build<I, S>(raw_dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw_dates
            .into_iter()
            .filter_map(|s| parse_lenient_date(s.as_ref()))
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holiday dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Number of holidays falling on a weekday in `(after, through]`.
    pub fn weekday_holidays_between(&self, after: NaiveDate, through: NaiveDate) -> usize {
        if through <= after {
            return 0;
        }
        self.dates
            .range((Bound::Excluded(after), Bound::Included(through)))
            .filter(|date| !is_weekend(**date))
            .count()
    }

    /// A working day is a weekday that is not a holiday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.contains(date)
    }

    /// The first working day strictly after `date`.
    pub fn next_working_day(&self, date: NaiveDate) -> Result<NaiveDate> {
        let mut day = succ(date)?;
        while !self.is_working_day(day) {
            day = succ(day)?;
        }
        Ok(day)
    }

    /// The first working day strictly after `at`, at 08:00.
    pub fn next_working_day_start(&self, at: NaiveDateTime) -> Result<NaiveDateTime> {
        Ok(self.next_working_day(at.date())?.and_time(day_start()))
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The calendar day after `date`.
pub(crate) fn succ(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| WorkingDateError::Overflow(format!("no day after {date}")))
}

/// The calendar day before `date`.
pub(crate) fn pred(date: NaiveDate) -> Result<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| WorkingDateError::Overflow(format!("no day before {date}")))
}

/// Extract the leading `YYYY-MM-DD` of a date-like string.
fn parse_lenient_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    let date = NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()?;
    // Anything after the date must be a time/zone suffix, not more digits.
    match s[head.len()..].chars().next() {
        Some(c) if c.is_ascii_digit() => None,
        _ => Some(date),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
