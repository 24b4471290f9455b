//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::Color;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent color for titles and the spinner.
    pub accent: Color,
    /// Background of the selected row.
    pub highlight: Color,
    /// Header cell that has keyboard focus.
    pub focused_header: Color,
    /// Secondary text (hints, borders).
    pub muted: Color,
    /// Error text and borders.
    pub error: Color,
    /// Search box border while editing.
    pub editing: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            highlight: Color::DarkGray,
            focused_header: Color::Yellow,
            muted: Color::DarkGray,
            error: Color::Red,
            editing: Color::Yellow,
        }
    }
}

/// Get the active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
