use super::date::{CalendarDate, InvalidDateError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An inclusive span of calendar days
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    begin: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    pub fn new(begin: CalendarDate, end: CalendarDate) -> DateRange {
        DateRange { begin, end }
    }

    pub fn begin(&self) -> CalendarDate {
        self.begin
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// A date is in the range if it is either endpoint or lies strictly
    /// between them.  If `end` precedes `begin`, only the endpoints match.
    pub fn contains(&self, date: CalendarDate) -> bool {
        date == self.begin || date == self.end || (self.begin < date && date < self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

impl FromStr for DateRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<DateRange, ParseRangeError> {
        let (begin, end) = s
            .split_once("..")
            .ok_or_else(|| ParseRangeError::Separator(s.to_owned()))?;
        Ok(DateRange::new(begin.parse()?, end.parse()?))
    }
}

#[derive(Debug, Error)]
pub enum ParseRangeError {
    #[error("invalid date range {0:?}; expected BEGIN..END")]
    Separator(String),
    #[error(transparent)]
    Date(#[from] InvalidDateError),
}

/// Every date is in range when no range is given.
pub fn in_range(range: Option<&DateRange>, date: CalendarDate) -> bool {
    match range {
        Some(range) => range.contains(date),
        None => true,
    }
}
