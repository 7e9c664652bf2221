use super::date::CalendarDate;
use super::grid::{DayCell, MonthGrid, WeekdayExt};
use crate::theme::{
    CURSOR_STYLE, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_MARKER, DEFAULT_MARKER_COLOR, DIMMED_STYLE,
    TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Text},
    widgets::{Paragraph, Widget},
};
use std::iter::zip;
use time::{Month, Weekday};

static HEADER: &str = " Su    Mo    Tu    We    Th    Fr    Sa  ";

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 41;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

/// Columns taken up by a day number and its brackets or padding; the marker
/// glyph, if any, goes immediately after
const LABEL_WIDTH: u16 = 4;

const ACS_HLINE: char = '─';

/// Presentation switches for a [`MonthView`].  None of these affect which
/// cells a [`MonthGrid`] contains.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayOptions {
    /// Draw today's date in brackets
    pub show_today: bool,
    /// Glyph drawn after each date pending re-sign
    pub marker: char,
    /// Background of signed and pending dates
    pub highlight_color: Color,
    /// Foreground of the marker glyph
    pub marker_color: Color,
}

impl Default for DisplayOptions {
    fn default() -> DisplayOptions {
        DisplayOptions {
            show_today: false,
            marker: DEFAULT_MARKER,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            marker_color: DEFAULT_MARKER_COLOR,
        }
    }
}

/// Draws a [`MonthGrid`] with a title and a Sunday-first weekday header
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthView<'a> {
    grid: &'a MonthGrid,
    options: &'a DisplayOptions,
    today: Option<CalendarDate>,
    cursor: Option<CalendarDate>,
}

impl<'a> MonthView<'a> {
    pub fn new(grid: &'a MonthGrid, options: &'a DisplayOptions) -> MonthView<'a> {
        MonthView {
            grid,
            options,
            today: None,
            cursor: None,
        }
    }

    pub fn today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn cursor(mut self, cursor: CalendarDate) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Number of lines needed to draw the whole grid
    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.grid.row_count()).unwrap_or(u16::MAX);
        HEADER_LINES
            .saturating_add(rows.saturating_mul(WEEK_LINES))
            .saturating_sub(1)
    }

    fn label(&self, cell: &DayCell) -> Span<'static> {
        let is_today = self.options.show_today && self.today == Some(cell.date);
        let s = if is_today {
            format!("[{:2}]", cell.date.day())
        } else {
            format!(" {:2} ", cell.date.day())
        };
        let mut style = Style::new();
        if self.grid.is_dimmed(cell) {
            style = style.patch(DIMMED_STYLE);
        }
        if cell.is_highlighted || cell.has_marker {
            style = style.bg(self.options.highlight_color);
        }
        if self.cursor == Some(cell.date) {
            style = style.patch(CURSOR_STYLE);
        }
        Span::styled(s, style)
    }

    fn marker(&self) -> Span<'static> {
        Span::styled(
            self.options.marker.to_string(),
            Style::new()
                .fg(self.options.marker_color)
                .add_modifier(Modifier::BOLD),
        )
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([self.height()])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(self.grid.year(), self.grid.month());
        canvas.draw_header();
        for (i, row) in zip(0u16.., self.grid.rows()) {
            for (wd, cell) in row.enumerate() {
                canvas.draw_day(i, wd, &self.label(&cell));
                if cell.has_marker {
                    canvas.draw_marker(i, wd, &self.marker());
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, year: i32, month: Month) {
        let title = format!("{month} {year}");
        let width = u16::try_from(title.len()).unwrap_or(MAIN_WIDTH);
        self.mvprint(0, 0, "<", Some(TITLE_STYLE));
        self.mvprint(0, MAIN_WIDTH.saturating_sub(width) / 2, title, Some(TITLE_STYLE));
        self.mvprint(0, MAIN_WIDTH - 1, ">", Some(TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, s: &Span<'_>) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * wd.index0(),
            &s.content,
            Some(s.style),
        );
    }

    fn draw_marker(&mut self, week_no: u16, wd: Weekday, s: &Span<'_>) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH * wd.index0() + LABEL_WIDTH,
            &s.content,
            Some(s.style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect handed to the Paragraph must lie entirely within the
            // buffer, so clip it to our area.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_month_grid;
    use time::macros::date;

    const NO_DATES: &[CalendarDate] = &[];

    #[test]
    fn test_render_february_2024() {
        let signed = [CalendarDate::from(date!(2024 - 02 - 10))];
        let pending = [CalendarDate::from(date!(2024 - 02 - 15))];
        let grid = build_month_grid(
            CalendarDate::from(date!(2024 - 02 - 01)),
            &signed[..],
            &pending[..],
            None,
        )
        .unwrap();
        let options = DisplayOptions {
            show_today: true,
            marker: '*',
            highlight_color: Color::Blue,
            marker_color: Color::LightRed,
        };
        let view = MonthView::new(&grid, &options)
            .today(CalendarDate::from(date!(2024 - 02 - 20)))
            .cursor(CalendarDate::from(date!(2024 - 02 - 22)));
        assert_eq!(view.height(), 12);
        let area = Rect::new(0, 0, 41, 12);
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "<             February 2024             >",
            " Su    Mo    Tu    We    Th    Fr    Sa  ",
            "─────────────────────────────────────────",
            " 28    29    30    31     1     2     3  ",
            "                                         ",
            "  4     5     6     7     8     9    10  ",
            "                                         ",
            " 11    12    13    14    15 *  16    17  ",
            "                                         ",
            " 18    19   [20]   21    22    23    24  ",
            "                                         ",
            " 25    26    27    28    29     1     2  ",
        ]);
        expected.set_style(Rect::new(0, 0, 1, 1), TITLE_STYLE);
        expected.set_style(Rect::new(14, 0, 13, 1), TITLE_STYLE);
        expected.set_style(Rect::new(40, 0, 1, 1), TITLE_STYLE);
        expected.set_style(Rect::new(0, 1, 41, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(0, 3, 4, 1), DIMMED_STYLE);
        expected.set_style(Rect::new(6, 3, 4, 1), DIMMED_STYLE);
        expected.set_style(Rect::new(12, 3, 4, 1), DIMMED_STYLE);
        expected.set_style(Rect::new(18, 3, 4, 1), DIMMED_STYLE);
        expected.set_style(Rect::new(36, 5, 4, 1), Style::new().bg(Color::Blue));
        expected.set_style(Rect::new(24, 7, 4, 1), Style::new().bg(Color::Blue));
        expected.set_style(
            Rect::new(28, 7, 1, 1),
            Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        );
        expected.set_style(Rect::new(24, 9, 4, 1), CURSOR_STYLE);
        expected.set_style(Rect::new(30, 11, 4, 1), DIMMED_STYLE);
        expected.set_style(Rect::new(36, 11, 4, 1), DIMMED_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_today_hidden_by_default() {
        let grid = build_month_grid(
            CalendarDate::from(date!(2024 - 09 - 01)),
            NO_DATES,
            NO_DATES,
            None,
        )
        .unwrap();
        let options = DisplayOptions::default();
        let view = MonthView::new(&grid, &options).today(CalendarDate::from(date!(2024 - 09 - 01)));
        let area = Rect::new(0, 0, 41, view.height());
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        assert_eq!(buffer[(0, 3)].symbol(), " ");
        assert_eq!(buffer[(2, 3)].symbol(), "1");
        assert_eq!(buffer[(3, 3)].symbol(), " ");
    }

    #[test]
    fn test_range_dims_outside() {
        let range = "2024-09-05..2024-09-10".parse().unwrap();
        let grid = build_month_grid(
            CalendarDate::from(date!(2024 - 09 - 01)),
            NO_DATES,
            NO_DATES,
            Some(range),
        )
        .unwrap();
        let options = DisplayOptions::default();
        let view = MonthView::new(&grid, &options);
        let area = Rect::new(0, 0, 41, view.height());
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        // September 4 is a Wednesday in the first week
        assert_eq!(buffer[(20, 3)].fg, Color::DarkGray);
        // September 5 is a Thursday
        assert_eq!(buffer[(26, 3)].fg, Color::Reset);
    }

    #[test]
    fn test_narrow_area_does_not_panic() {
        let grid = build_month_grid(
            CalendarDate::from(date!(2024 - 02 - 01)),
            NO_DATES,
            NO_DATES,
            None,
        )
        .unwrap();
        let options = DisplayOptions::default();
        let area = Rect::new(0, 0, 10, 5);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&grid, &options).render(area, &mut buffer);
        assert_eq!(buffer[(0, 0)].symbol(), "<");
    }
}
