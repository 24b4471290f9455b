//! Search box component.
//!
//! Keystrokes are buffered in the box; the query only takes effect when the
//! user submits it with Enter. Esc abandons the edit.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::input::TextInput;
use crate::ui::theme::theme;

/// Actions that can be returned from the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// The buffered value was submitted.
    Submit(String),
    /// Editing was abandoned.
    Cancel,
}

/// Buffered search box state.
#[derive(Debug, Clone)]
pub struct SearchBar {
    /// The edit buffer.
    input: TextInput,
    /// Whether the box has keyboard focus.
    editing: bool,
}

impl SearchBar {
    /// Create a new, empty search bar.
    pub fn new() -> Self {
        Self {
            input: TextInput::new(),
            editing: false,
        }
    }

    /// Focus the box, starting from `current_query`.
    pub fn start_editing(&mut self, current_query: &str) {
        self.input.set_value(current_query);
        self.editing = true;
    }

    /// Check if the box has focus.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The buffered (not yet submitted) text.
    pub fn buffer(&self) -> &str {
        self.input.value()
    }

    /// Handle keyboard input while editing.
    ///
    /// Returns `Some(SearchAction)` on submit or cancel, `None` otherwise.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SearchAction> {
        if !self.editing {
            return None;
        }

        match key.code {
            KeyCode::Enter => {
                self.editing = false;
                Some(SearchAction::Submit(self.buffer().to_string()))
            }
            KeyCode::Esc => {
                self.editing = false;
                Some(SearchAction::Cancel)
            }
            _ => {
                self.input.handle_input(key);
                None
            }
        }
    }

    /// Render the box. Shows the buffer while editing, else the active query.
    pub fn render(&self, frame: &mut Frame, area: Rect, active_query: &str) {
        let t = theme();
        let (text, style) = if self.editing {
            (self.buffer().to_string(), Style::default().fg(t.fg))
        } else if active_query.is_empty() {
            (
                "Press / to search".to_string(),
                Style::default().fg(t.muted),
            )
        } else {
            (active_query.to_string(), Style::default().fg(t.fg))
        };

        let border = if self.editing { t.editing } else { t.muted };
        let title = if self.editing {
            " Search (Enter to apply, Esc to cancel) "
        } else {
            " Search "
        };

        let widget = Paragraph::new(text).style(style).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(widget, area);

        if self.editing {
            let cursor_x = area.x + 1 + self.input.cursor() as u16;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}

/// Highlight case-insensitive occurrences of `query` in `text`.
///
/// Matching runs on the lowercased text. Each lowercased byte remembers the
/// original character it came from, so highlighted ranges always cover whole
/// characters of `text` even when lowercasing changes byte lengths.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }

    let query_lower = query.to_lowercase();
    let mut text_lower = String::with_capacity(text.len());
    // Byte range in `text` of the character behind each byte of `text_lower`.
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (idx, c) in text.char_indices() {
        let range = (idx, idx + c.len_utf8());
        for lower in c.to_lowercase() {
            text_lower.push(lower);
            origin.extend(std::iter::repeat(range).take(lower.len_utf8()));
        }
    }

    let mut spans = Vec::new();
    let mut last_end = 0;
    for (lower_start, matched) in text_lower.match_indices(&query_lower) {
        let (start, _) = origin[lower_start];
        let (_, end) = origin[lower_start + matched.len() - 1];
        // Part of a character already highlighted by the previous match.
        if start < last_end {
            continue;
        }
        if start > last_end {
            spans.push(Span::raw(text[last_end..start].to_string()));
        }
        spans.push(Span::styled(
            text[start..end].to_string(),
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
        last_end = end;
    }

    if last_end < text.len() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    if spans.is_empty() {
        Line::from(text.to_string())
    } else {
        Line::from(spans)
    }
}
