mod date;
mod grid;
mod range;
mod widget;
pub use self::date::{
    days_in_month, is_leap_year, shift_month, CalendarDate, Direction, InvalidDateError,
    OutOfTimeError,
};
pub use self::grid::{build_month_grid, DayCell, MonthGrid, MonthGridBuilder, Row, DAYS_IN_WEEK};
pub use self::range::{in_range, DateRange, ParseRangeError};
pub use self::widget::{DisplayOptions, MonthView};
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// A set of dates that a [`MonthGridBuilder`] can query.  Absence is not an
/// error; it simply yields `false`.
pub trait DateLookup {
    fn contains_date(&self, date: CalendarDate) -> bool;
}

impl<T: DateLookup + ?Sized> DateLookup for &T {
    fn contains_date(&self, date: CalendarDate) -> bool {
        (**self).contains_date(date)
    }
}

impl DateLookup for [CalendarDate] {
    fn contains_date(&self, date: CalendarDate) -> bool {
        self.contains(&date)
    }
}

impl DateLookup for Vec<CalendarDate> {
    fn contains_date(&self, date: CalendarDate) -> bool {
        self.contains(&date)
    }
}

impl DateLookup for BTreeSet<CalendarDate> {
    fn contains_date(&self, date: CalendarDate) -> bool {
        self.contains(&date)
    }
}

impl<S: BuildHasher> DateLookup for HashSet<CalendarDate, S> {
    fn contains_date(&self, date: CalendarDate) -> bool {
        self.contains(&date)
    }
}
