//! Error panel shown in place of the table when loading fails.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::error::AppError;
use crate::ui::theme::theme;

/// Build the lines of the error panel for `error`.
pub fn error_lines(error: &AppError) -> Vec<Line<'static>> {
    let t = theme();
    let mut lines = vec![
        Line::raw(""),
        Line::styled(
            error.title(),
            Style::default().fg(t.error).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(error.user_message()),
    ];

    if let Some(action) = error.suggested_action() {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Hint: ", Style::default().fg(t.editing)),
            Span::raw(action),
        ]));
    }

    if error.is_recoverable() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press 'r' to reload or 'q' to quit",
            Style::default().fg(t.muted),
        ));
    }

    lines
}

/// Render the error panel for `error` into `area`.
pub fn render_error_panel(frame: &mut Frame, area: Rect, error: &AppError) {
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme().error));

    let paragraph = Paragraph::new(error_lines(error))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_http_error_lines() {
        let err = AppError::Api(ApiError::Http {
            status: 500,
            message: "something went wrong".to_string(),
        });
        let text = text_of(&error_lines(&err));
        assert!(text.contains("HTTP error 500"));
        assert!(text.contains("something went wrong"));
        assert!(text.contains("Press 'r' to reload"));
    }

    #[test]
    fn test_decode_error_lines() {
        let err = AppError::Api(ApiError::Decode("missing field `data`".to_string()));
        let text = text_of(&error_lines(&err));
        assert!(text.contains("Invalid response"));
        assert!(text.contains("missing field `data`"));
    }
}
