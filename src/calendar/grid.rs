use super::date::{days_in_month, month_after, month_before, CalendarDate, OutOfTimeError};
use super::range::{in_range, DateRange};
use super::DateLookup;
use std::array;
use std::ops::Index;
use time::{Month, Weekday, Weekday::*};

pub const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayCell {
    pub date: CalendarDate,
    /// Whether the date falls in the month the grid was built for, as opposed
    /// to the padding borrowed from the months either side
    pub in_displayed_month: bool,
    /// The date is pending re-sign
    pub has_marker: bool,
    /// The date has been signed
    pub is_highlighted: bool,
}

/// One Sunday-first week of a [`MonthGrid`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Row([DayCell; DAYS_IN_WEEK]);

impl Row {
    pub fn cells(&self) -> &[DayCell; DAYS_IN_WEEK] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayCell> {
        self.0.iter()
    }

    pub fn enumerate(&self) -> impl Iterator<Item = (Weekday, DayCell)> + '_ {
        std::iter::successors(Some(Sunday), |wd| match wd.next() {
            Sunday => None,
            wd2 => Some(wd2),
        })
        .zip(self.0)
    }

    pub fn first(&self) -> DayCell {
        self[Sunday]
    }

    pub fn last(&self) -> DayCell {
        self[Saturday]
    }
}

impl Index<Weekday> for Row {
    type Output = DayCell;

    fn index(&self, wd: Weekday) -> &DayCell {
        &self.0[usize::from(wd.index0())]
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a DayCell;
    type IntoIter = std::slice::Iter<'a, DayCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The weeks covering one month, padded at either end with days from the
/// neighboring months so that every row is full
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    year: i32,
    month: Month,
    lead_in: u8,
    lead_out: u8,
    rows: Vec<Row>,
    range: Option<DateRange>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of days at the start of the first row taken from the previous
    /// month
    pub fn lead_in_days(&self) -> u8 {
        self.lead_in
    }

    /// Number of days at the end of the last row taken from the next month
    pub fn lead_out_days(&self) -> u8 {
        self.lead_out
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.rows.iter().flatten()
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn in_range(&self, date: CalendarDate) -> bool {
        in_range(self.range.as_ref(), date)
    }

    /// Whether a cell should be drawn de-emphasized.  With a selectable range,
    /// everything outside the range is dimmed; otherwise, the padding days
    /// are.
    pub fn is_dimmed(&self, cell: &DayCell) -> bool {
        match self.range {
            Some(ref range) => !range.contains(cell.date),
            None => !cell.in_displayed_month,
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => first.first().date <= date && date <= last.last().date,
            _ => false,
        }
    }
}

/// Builds [`MonthGrid`]s, looking up the signed and pending re-sign status of
/// each day as it goes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthGridBuilder<S, P> {
    signed: S,
    pending: P,
    range: Option<DateRange>,
}

impl<S: DateLookup, P: DateLookup> MonthGridBuilder<S, P> {
    pub fn new(signed: S, pending: P) -> Self {
        MonthGridBuilder {
            signed,
            pending,
            range: None,
        }
    }

    pub fn date_range(mut self, range: Option<DateRange>) -> Self {
        self.range = range;
        self
    }

    pub fn signed(&self) -> &S {
        &self.signed
    }

    pub fn pending(&self) -> &P {
        &self.pending
    }

    /// Build the grid for the month containing `target`.  The day of `target`
    /// is irrelevant.
    ///
    /// Fails only if the grid would need a padding day outside the
    /// representable calendar.
    pub fn build(&self, target: CalendarDate) -> Result<MonthGrid, OutOfTimeError> {
        let year = target.year();
        let month = target.month();
        let length = days_in_month(year, month);
        // Number of days from the preceding Sunday to the 1st, which is
        // 0 rather than 7 when the 1st is a Sunday
        let lead_in = ymd(year, month, 1)?.weekday().number_days_from_sunday();
        let lead_out = lead_out_days(lead_in, length);
        let (prev_year, prev_month) = month_before(year, month);
        let prev_length = days_in_month(prev_year, prev_month);
        let (next_year, next_month) = month_after(year, month);

        let total = usize::from(lead_in) + usize::from(length) + usize::from(lead_out);
        let mut cells = Vec::with_capacity(total);
        for day in (prev_length - lead_in + 1)..=prev_length {
            cells.push(self.cell(ymd(prev_year, prev_month, day)?, false));
        }
        for day in 1..=length {
            cells.push(self.cell(ymd(year, month, day)?, true));
        }
        for day in 1..=lead_out {
            cells.push(self.cell(ymd(next_year, next_month, day)?, false));
        }
        debug_assert_eq!(cells.len(), total, "grid should hold every generated cell");
        debug_assert_eq!(total % DAYS_IN_WEEK, 0, "grid should fill whole weeks");

        let rows = cells
            .chunks_exact(DAYS_IN_WEEK)
            .map(|week| Row(array::from_fn(|i| week[i])))
            .collect::<Vec<_>>();
        log::debug!(
            "Built grid for {month} {year}: {} rows, {lead_in} lead-in days, {lead_out} lead-out days",
            rows.len()
        );
        Ok(MonthGrid {
            year,
            month,
            lead_in,
            lead_out,
            rows,
            range: self.range,
        })
    }

    fn cell(&self, date: CalendarDate, in_displayed_month: bool) -> DayCell {
        DayCell {
            date,
            in_displayed_month,
            has_marker: self.pending.contains_date(date),
            is_highlighted: self.signed.contains_date(date),
        }
    }
}

/// Build the grid for the month containing `target` in one call
pub fn build_month_grid<S, P>(
    target: CalendarDate,
    signed: &S,
    pending: &P,
    range: Option<DateRange>,
) -> Result<MonthGrid, OutOfTimeError>
where
    S: DateLookup + ?Sized,
    P: DateLookup + ?Sized,
{
    MonthGridBuilder::new(signed, pending)
        .date_range(range)
        .build(target)
}

fn lead_out_days(lead_in: u8, length: u8) -> u8 {
    // DAYS_IN_WEEK always fits in a u8
    const WEEK: u8 = 7;
    (WEEK - (lead_in + length) % WEEK) % WEEK
}

fn ymd(year: i32, month: Month, day: u8) -> Result<CalendarDate, OutOfTimeError> {
    CalendarDate::from_ymd(year, month, day).map_err(|_| OutOfTimeError)
}
