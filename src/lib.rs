//! Month grids for a sign-in calendar.
//!
//! A [`MonthGrid`] lays out the days of one month as Sunday-first weeks,
//! padded with the tail of the previous month and the head of the next one.
//! Each day is flagged as signed (highlighted) or pending re-sign (marked)
//! according to the caller's [`DateLookup`]s.  [`MonthView`] draws a grid in
//! a terminal with [`ratatui`].
mod calendar;
pub mod theme;
pub use crate::calendar::*;
