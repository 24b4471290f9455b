//! Spinner shown while the table fetch is in flight.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An animated spinner with a label. Draws nothing while stopped.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    label: String,
    frame: usize,
    running: bool,
}

impl LoadingIndicator {
    pub fn with_message(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frame: 0,
            running: false,
        }
    }

    /// Show the spinner, restarting the animation.
    pub fn start(&mut self) {
        self.running = true;
        self.frame = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one animation frame. No-op while stopped.
    pub fn tick(&mut self) {
        if self.running {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    fn line(&self) -> Option<String> {
        self.running
            .then(|| format!("{} {}", FRAMES[self.frame], self.label))
    }

    /// Draw the spinner on the vertical middle of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(line) = self.line() else {
            return;
        };

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(line)
                .style(Style::default().fg(theme().accent))
                .alignment(Alignment::Center),
            middle,
        );
    }
}
