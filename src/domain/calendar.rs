use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day with no time component, serialized as `YYYY-MM-DD`.
///
/// Arithmetic goes through `NaiveDate`, so shifting never crosses a timezone
/// boundary and month/year rollover is handled by the calendar itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    #[must_use]
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn add_days(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    #[must_use]
    pub fn shift_week(self, forward: bool) -> Self {
        self.add_days(if forward { 7 } else { -7 })
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Full weekday name, e.g. `Monday`.
    #[must_use]
    pub fn weekday_name(self) -> String {
        self.0.format("%A").to_string()
    }

    /// Zero-padded `MM/DD`.
    #[must_use]
    pub fn month_day(self) -> String {
        self.0.format("%m/%d").to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = chrono::ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map(Self)
    }
}

/// Moves `date` seven days forward or back.
#[must_use]
pub fn shift_week(forward: bool, date: CalendarDate) -> CalendarDate {
    date.shift_week(forward)
}

/// Days until the next occurrence of `target`, counting `from` itself as 0.
///
/// Always in `0..=6`: picking yesterday's weekday jumps six days ahead.
#[must_use]
pub fn day_jump_to(from: Weekday, target: Weekday) -> i64 {
    let from = i64::from(from.num_days_from_sunday());
    let target = i64::from(target.num_days_from_sunday());
    (target - from).rem_euclid(7)
}

/// Where "today" comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Today {
    #[default]
    Local,
    Fixed(CalendarDate),
}

impl Today {
    #[must_use]
    pub fn resolve(self) -> CalendarDate {
        match self {
            Self::Local => CalendarDate::today(),
            Self::Fixed(date) => date,
        }
    }
}
