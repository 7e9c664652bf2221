use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use signcal::{
    shift_month, theme::BASE_STYLE, CalendarDate, Direction, DisplayOptions, MonthGrid,
    MonthGridBuilder, MonthView, OutOfTimeError,
};
use std::collections::BTreeSet;
use std::io::{self, Write};

pub(crate) type DateSet = BTreeSet<CalendarDate>;

/// Interactive month calendar.  The grid is rebuilt whenever the cursor moves
/// into a different month, and `on_select` is called with the cursor's date
/// whenever the user selects it.
pub(crate) struct App<H> {
    builder: MonthGridBuilder<DateSet, DateSet>,
    options: DisplayOptions,
    today: CalendarDate,
    cursor: CalendarDate,
    grid: MonthGrid,
    on_select: H,
    state: AppState,
}

impl<H: FnMut(CalendarDate)> App<H> {
    pub(crate) fn new(
        builder: MonthGridBuilder<DateSet, DateSet>,
        options: DisplayOptions,
        today: CalendarDate,
        start: CalendarDate,
        on_select: H,
    ) -> Result<App<H>, OutOfTimeError> {
        let grid = builder.build(start)?;
        Ok(App {
            builder,
            options,
            today,
            cursor: start,
            grid,
            on_select,
            state: AppState::Calendar,
        })
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        log::trace!("Key {key:?} in state {:?}", self.state);
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.shift(Direction::Prev),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.shift(Direction::Next),
                KeyCode::Char('0') | KeyCode::Home => self.set_cursor(self.today),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.select();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.set_cursor(date)
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    // Returns `false` if the date cannot be displayed
    fn set_cursor(&mut self, date: CalendarDate) -> bool {
        if date.year() != self.grid.year() || date.month() != self.grid.month() {
            match self.builder.build(date) {
                Ok(grid) => self.grid = grid,
                Err(e) => {
                    log::debug!("Cannot display month of {date}: {e}");
                    return false;
                }
            }
        }
        self.cursor = date;
        true
    }

    fn move_cursor(&mut self, days: i64) -> bool {
        match self.cursor.checked_add_days(days) {
            Some(date) => self.set_cursor(date),
            None => false,
        }
    }

    fn shift(&mut self, direction: Direction) -> bool {
        match shift_month(self.cursor, direction) {
            Ok(date) => self.set_cursor(date),
            Err(_) => false,
        }
    }

    fn select(&mut self) {
        log::info!("Selected {}", self.cursor);
        (self.on_select)(self.cursor);
    }
}

impl<H> Widget for &mut App<H> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthView::new(&self.grid, &self.options)
            .today(self.today)
            .cursor(self.cursor)
            .render(area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
