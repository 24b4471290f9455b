//! Help panel listing keyboard shortcuts.
//!
//! Opened with '?' and closed with '?', 'q', or Escape.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// Shortcuts grouped by context.
const KEYBINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("q / Ctrl+c", "Quit"),
            ("?", "Toggle this help"),
            ("r", "Reload tables"),
        ],
    ),
    (
        "Table",
        &[
            ("j / ↓", "Next row"),
            ("k / ↑", "Previous row"),
            ("g / G", "First / last row"),
            ("h l / ← →", "Move header focus"),
            ("s / Enter", "Sort by focused column (again to flip)"),
            ("1-9", "Sort by column N"),
            ("/", "Edit search"),
            ("Esc", "Clear search"),
        ],
    ),
    (
        "Search box",
        &[
            ("Enter", "Apply search"),
            ("Esc", "Cancel edit"),
            ("Ctrl+u", "Clear input"),
        ],
    ),
];

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help panel.
    Close,
}

/// The help panel view.
#[derive(Debug, Default)]
pub struct HelpView {
    /// Current scroll position.
    scroll: u16,
}

impl HelpView {
    /// Create a new help view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines() -> u16 {
        KEYBINDINGS
            .iter()
            .map(|(_, bindings)| bindings.len() as u16 + 2)
            .sum::<u16>()
            + 1
    }

    /// Handle keyboard input for the help view.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _) | (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                Some(HelpAction::Close)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(Self::total_lines().saturating_sub(1));
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    fn build_content_lines() -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = Vec::new();

        for (context, bindings) in KEYBINDINGS {
            lines.push(Line::styled(
                format!("── {} ──", context),
                Style::default().fg(t.editing).add_modifier(Modifier::BOLD),
            ));
            for (key, description) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>12}", key),
                        Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::raw(""));
        }

        lines.push(Line::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(t.muted),
        ));
        lines
    }

    /// Render the help panel as a centered popup over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme().accent));

        let paragraph = Paragraph::new(Self::build_content_lines())
            .block(block)
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, popup);
    }
}

/// A rect of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
