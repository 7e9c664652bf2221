use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use signcal::{
    theme::{
        jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
        BASE_STYLE,
    },
    CalendarDate,
};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const YEAR_DIGITS: usize = 4;
const ENTER_POS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌─ Jump To… ──┐.
     * .│             │.
     * .│   YYYY-MM   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Jump To… ")
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// A year and month being typed in digit by digit
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    year: [Option<u8>; YEAR_DIGITS],
    month: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let digit = |dg: &Option<u8>, fallback: &'static str| match dg {
            Some(d) => Span::styled(d.to_string(), BASE_STYLE),
            None => Span::styled(fallback, UNFILLED_CELL_STYLE),
        };
        self.year
            .iter()
            .map(|dg| digit(dg, "Y"))
            .chain(std::iter::once(Span::styled("-", BASE_STYLE)))
            .chain(self.month.iter().map(|dg| digit(dg, "M")))
            .collect()
    }

    fn slot(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        match pos {
            0..YEAR_DIGITS => self.year.get_mut(pos),
            YEAR_DIGITS..ENTER_POS => self.month.get_mut(pos - YEAR_DIGITS),
            _ => None,
        }
    }

    /// The first day of the entered month, or `None` if any digit is missing
    /// or the month is not 01 through 12
    fn target(&self) -> Option<CalendarDate> {
        let year = self
            .year
            .iter()
            .try_fold(0i32, |acc, dg| Some(acc * 10 + i32::from((*dg)?)))?;
        let month = self
            .month
            .iter()
            .try_fold(0u8, |acc, dg| Some(acc * 10 + (*dg)?))?;
        CalendarDate::new(year, month.checked_sub(1)?, 1).ok()
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Digit(d), 0..ENTER_POS) => {
                if let Some(slot) = self.slot(self.pos) {
                    *slot = Some(d);
                }
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                if let Some(slot) = self.slot(self.pos) {
                    *slot = None;
                }
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => match self.target() {
                Some(date) => JumpToOutput::Jump(date),
                None => JumpToOutput::Invalid,
            },
            _ => JumpToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(CalendarDate),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn type_digits(state: &mut JumpToState, digits: &[u8]) {
        for &d in digits {
            assert_eq!(state.handle_input(JumpToInput::Digit(d)), JumpToOutput::Ok);
        }
    }

    #[test]
    fn test_jump() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 5, 1, 2]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(CalendarDate::from(date!(2025 - 12 - 01)))
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 5, 1]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_too_many_digits() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 5, 0, 3]);
        assert_eq!(
            state.handle_input(JumpToInput::Digit(1)),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_bad_month() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 5, 1, 3]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Invalid
        );
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0, 2, 5, 0, 0]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_backspace() {
        let mut state = JumpToState::new();
        assert_eq!(
            state.handle_input(JumpToInput::Backspace),
            JumpToOutput::Invalid
        );
        type_digits(&mut state, &[1, 9, 9, 9, 0, 9]);
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        assert_eq!(state.month, [None, None]);
        type_digits(&mut state, &[0, 2]);
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump(CalendarDate::from(date!(1999 - 02 - 01)))
        );
    }

    #[test]
    fn test_render_partial_entry() {
        let mut state = JumpToState::new();
        type_digits(&mut state, &[2, 0]);
        let area = Rect::new(0, 0, OUTER_WIDTH, OUTER_HEIGHT);
        let mut buffer = Buffer::empty(area);
        JumpTo.render(area, &mut buffer, &mut state);
        let row = (0..OUTER_WIDTH)
            .map(|x| buffer[(x, 3)].symbol().to_owned())
            .collect::<String>();
        assert_eq!(row, " │   20YY-MM   │ ");
        assert_eq!(buffer[(7, 3)].fg, UNFILLED_CELL_STYLE.fg.unwrap_or_default());
    }
}
