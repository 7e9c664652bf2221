use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub const WEEKDAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Padding days, or days outside the selectable range
pub const DIMMED_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub const DEFAULT_HIGHLIGHT_COLOR: Color = Color::Blue;

pub const DEFAULT_MARKER_COLOR: Color = Color::LightRed;

pub const DEFAULT_MARKER: char = '•';

pub mod help {
    use super::*;

    pub const KEY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}

pub mod jumpto {
    use super::*;

    pub const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
