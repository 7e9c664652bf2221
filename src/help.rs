use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};
use signcal::theme::{help::KEY_STYLE, BASE_STYLE};

/// (keys, action) pairs listed in the popup
static BINDINGS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous day"),
    ("l, RIGHT", "Next day"),
    ("k, UP", "Previous week"),
    ("j, DOWN", "Next week"),
    ("p, <, PAGE UP", "Previous month"),
    ("n, >, PAGE DOWN", "Next month"),
    ("0, HOME", "Jump to today"),
    ("g", "Input month to jump to"),
    ("ENTER, SPACE", "Select date"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEYS_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        BINDINGS
            .iter()
            .map(|&(keys, action)| {
                Line::from_iter([
                    Span::styled(format!("{keys:<KEYS_WIDTH$}"), KEY_STYLE),
                    Span::raw(action),
                ])
            })
            .chain([Line::default(), Line::raw("Press any key to dismiss.")])
            .collect()
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Borders on all sides plus a column of padding left and right
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(BASE_STYLE)
            .render(popup, buf);
    }
}
