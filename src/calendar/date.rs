use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{
    error::Parse,
    format_description::BorrowedFormatItem,
    macros::format_description,
    Date, Duration, Month,
    Month::{December, February, January},
    OffsetDateTime, PrimitiveDateTime, Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Month lengths in a common year, January first
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A day on the proleptic Gregorian calendar, without any time of day.
///
/// Ordering is chronological.  Two `CalendarDate`s are equal iff their year,
/// month, and day are equal.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Construct a date from a year, a zero-based month index (0 = January),
    /// and a one-based day of the month.
    pub fn new(year: i32, month0: u8, day: u8) -> Result<CalendarDate, InvalidDateError> {
        let month = month0
            .checked_add(1)
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(InvalidDateError::Month(month0))?;
        CalendarDate::from_ymd(year, month, day)
    }

    pub fn from_ymd(year: i32, month: Month, day: u8) -> Result<CalendarDate, InvalidDateError> {
        Date::from_calendar_date(year, month, day)
            .map(CalendarDate)
            .map_err(|e| {
                if e.name() == "year" {
                    InvalidDateError::Year(year)
                } else {
                    InvalidDateError::Day { year, month, day }
                }
            })
    }

    /// Parse either `YYYY-MM-DD` or `YYYY-MM`; the latter yields the first day
    /// of the month.
    pub fn parse_month(s: &str) -> Result<CalendarDate, InvalidDateError> {
        s.parse::<CalendarDate>()
            .or_else(|e| format!("{s}-01").parse::<CalendarDate>().map_err(|_| e))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    /// Zero-based month index, 0 = January through 11 = December
    pub fn month0(self) -> u8 {
        u8::from(self.0.month()) - 1
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn date(self) -> Date {
        self.0
    }

    pub fn is_same_month(self, other: CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    /// Returns `None` if the result would fall outside the representable
    /// calendar.
    pub fn checked_add_days(self, days: i64) -> Option<CalendarDate> {
        self.0.checked_add(Duration::days(days)).map(CalendarDate)
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> CalendarDate {
        CalendarDate(date)
    }
}

impl From<PrimitiveDateTime> for CalendarDate {
    fn from(dt: PrimitiveDateTime) -> CalendarDate {
        CalendarDate(dt.date())
    }
}

impl From<OffsetDateTime> for CalendarDate {
    fn from(dt: OffsetDateTime) -> CalendarDate {
        CalendarDate(dt.date())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            u8::from(self.month()),
            self.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<CalendarDate, InvalidDateError> {
        Date::parse(s, &YMD_FMT)
            .map(CalendarDate)
            .map_err(|source| InvalidDateError::Parse {
                input: s.to_owned(),
                source,
            })
    }
}

#[derive(Debug, Error)]
pub enum InvalidDateError {
    #[error("month index {0} is outside the range 0-11")]
    Month(u8),
    #[error("year {0} is outside the supported range")]
    Year(i32),
    #[error("{month} {year} has no day {day}")]
    Day { year: i32, month: Month, day: u8 },
    #[error("invalid date {input:?}; expected YYYY-MM-DD")]
    Parse {
        input: String,
        #[source]
        source: Parse,
    },
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Prev,
    Next,
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    if month == February && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[usize::from(u8::from(month) - 1)]
    }
}

pub(crate) fn month_before(year: i32, month: Month) -> (i32, Month) {
    match month {
        January => (year - 1, December),
        m => (year, m.previous()),
    }
}

pub(crate) fn month_after(year: i32, month: Month) -> (i32, Month) {
    match month {
        December => (year + 1, January),
        m => (year, m.next()),
    }
}

/// Move `current` one month forwards or backwards.  The day of the month is
/// kept where possible and otherwise clamped to the last day of the new month.
pub fn shift_month(
    current: CalendarDate,
    direction: Direction,
) -> Result<CalendarDate, OutOfTimeError> {
    let (year, month) = match direction {
        Direction::Prev => month_before(current.year(), current.month()),
        Direction::Next => month_after(current.year(), current.month()),
    };
    let day = current.day().min(days_in_month(year, month));
    log::trace!("Shifting {current} {direction:?} to {year}-{month}");
    CalendarDate::from_ymd(year, month, day).map_err(|_| OutOfTimeError)
}
