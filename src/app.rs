//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application: `update` applies events,
//! `handle_api_message` applies background results, and `view` renders.

use tracing::{debug, info, trace, warn};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::Table;
use crate::error::AppError;
use crate::events::Event;
use crate::tasks::ApiMessage;
use crate::ui::theme::theme;
use crate::ui::{render_error_panel, HelpAction, HelpView, LoadingIndicator, TableView};

/// What the app knows about the table list.
#[derive(Debug)]
pub enum TablesState {
    /// The fetch has not resolved yet.
    Loading,
    /// The fetch succeeded.
    Loaded {
        /// Every table returned by the API.
        tables: Vec<Table>,
        /// The displayed table. Only the first table is ever selected.
        selected_table_id: Option<i64>,
    },
    /// The last fetch failed.
    Failed(AppError),
}

/// The main application struct that holds all state.
pub struct App {
    /// Table list state.
    tables: TablesState,
    /// View over the selected table; kept across reloads of the same table.
    table_view: Option<TableView>,
    /// Whether the application should quit.
    should_quit: bool,
    /// Whether the help overlay is open.
    show_help: bool,
    /// The help overlay.
    help: HelpView,
    /// Spinner shown while loading.
    loading: LoadingIndicator,
    /// Whether a fetch should be spawned by the main loop.
    pending_fetch: bool,
    /// Id of the fetch the app is waiting on.
    in_flight: Option<u64>,
    /// Id for the next fetch.
    next_request_id: u64,
}

impl App {
    /// Create a new application instance.
    ///
    /// The initial fetch is queued; the main loop spawns it via
    /// [`App::take_pending_fetch`].
    pub fn new() -> Self {
        debug!("Creating new application instance");

        let mut loading = LoadingIndicator::with_message("Loading tables...");
        loading.start();

        Self {
            tables: TablesState::Loading,
            table_view: None,
            should_quit: false,
            show_help: false,
            help: HelpView::new(),
            loading,
            pending_fetch: true,
            in_flight: None,
            next_request_id: 1,
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The table list state.
    pub fn tables(&self) -> &TablesState {
        &self.tables
    }

    /// The id of the displayed table, if any.
    pub fn selected_table_id(&self) -> Option<i64> {
        match &self.tables {
            TablesState::Loaded {
                selected_table_id, ..
            } => *selected_table_id,
            _ => None,
        }
    }

    /// The view over the displayed table.
    pub fn table_view(&self) -> Option<&TableView> {
        self.table_view.as_ref()
    }

    /// The error currently shown, if the last fetch failed.
    pub fn error(&self) -> Option<&AppError> {
        match &self.tables {
            TablesState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Check if a fetch is queued or in flight.
    pub fn is_loading(&self) -> bool {
        self.pending_fetch || self.in_flight.is_some()
    }

    /// Check if the help overlay is open.
    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Queue a user-initiated reload. Ignored while a fetch is in flight.
    pub fn request_reload(&mut self) {
        if self.is_loading() {
            debug!("Reload ignored, fetch already pending");
            return;
        }
        info!("Reloading tables");
        self.pending_fetch = true;
        self.tables = TablesState::Loading;
        self.loading.start();
    }

    /// Take the queued fetch, returning the request id to spawn it with.
    pub fn take_pending_fetch(&mut self) -> Option<u64> {
        if !self.pending_fetch {
            return None;
        }
        self.pending_fetch = false;
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(id);
        debug!(request_id = id, "Fetch started");
        Some(id)
    }

    /// Apply a result from a background task.
    ///
    /// Results for requests the app is not waiting on, or that arrive once
    /// the app is exiting, are dropped.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::TablesFetched { request_id, result } => {
                if self.should_quit {
                    debug!(request_id, "Discarding fetch result, app is exiting");
                    return;
                }
                if self.in_flight != Some(request_id) {
                    debug!(request_id, expected = ?self.in_flight, "Discarding stale fetch result");
                    return;
                }
                self.in_flight = None;
                self.loading.stop();

                match result {
                    Ok(tables) => self.set_tables(tables),
                    Err(e) => {
                        warn!(error = %e, status = ?e.status(), "Failed to fetch tables");
                        self.tables = TablesState::Failed(AppError::Api(e));
                    }
                }
            }
        }
    }

    /// Store a fetched table list and select its first table.
    pub fn set_tables(&mut self, tables: Vec<Table>) {
        let selected = tables.first().cloned();
        let selected_table_id = selected.as_ref().map(|t| t.id);
        info!(count = tables.len(), selected = ?selected_table_id, "Tables loaded");

        self.table_view = match (self.table_view.take(), selected) {
            (Some(mut view), Some(table)) if view.table().id == table.id => {
                view.replace_table(table);
                Some(view)
            }
            (_, Some(table)) => Some(TableView::new(table)),
            (_, None) => None,
        };

        self.tables = TablesState::Loaded {
            tables,
            selected_table_id,
        };
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if let Some(HelpAction::Close) = self.help.handle_input(key_event) {
                self.show_help = false;
            }
            return;
        }

        let showing_table = matches!(self.tables, TablesState::Loaded { .. });

        // The search box swallows every key while it has focus.
        if showing_table {
            if let Some(view) = self.table_view.as_mut() {
                if view.is_editing() {
                    view.handle_input(key_event);
                    return;
                }
            }
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.should_quit = true;
            }
            (KeyCode::Char('?'), _) => {
                self.help.reset_scroll();
                self.show_help = true;
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                self.request_reload();
            }
            _ => {
                if showing_table {
                    if let Some(view) = self.table_view.as_mut() {
                        view.handle_input(key_event);
                    }
                }
            }
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer/Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);

        if self.show_help {
            self.help.render(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("LazyTables")
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(theme().muted)),
            );
        frame.render_widget(title, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        match &self.tables {
            TablesState::Loading => self.loading.render(frame, area),
            TablesState::Failed(error) => render_error_panel(frame, area, error),
            TablesState::Loaded { .. } => match self.table_view.as_mut() {
                Some(view) => view.render(frame, area),
                None => {
                    let placeholder = Paragraph::new(vec![
                        Line::raw(""),
                        Line::styled("No tables available", Style::default().fg(theme().muted)),
                    ])
                    .alignment(Alignment::Center);
                    frame.render_widget(placeholder, area);
                }
            },
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        if let (TablesState::Loaded { .. }, Some(view)) = (&self.tables, &self.table_view) {
            view.render_status_bar(frame, area);
            return;
        }

        let state_str = match &self.tables {
            TablesState::Loading => "Loading",
            TablesState::Failed(_) => "Error",
            TablesState::Loaded { .. } => "Empty",
        };

        let footer = Line::from(vec![
            Span::styled(
                format!(" {} ", state_str),
                Style::default().fg(Color::Black).bg(theme().accent),
            ),
            Span::raw(" "),
            Span::styled(
                "Press 'r' to reload, '?' for help, 'q' to quit",
                Style::default().fg(theme().muted),
            ),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
