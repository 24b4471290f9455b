//! Table view: a searchable, sortable view of one table.
//!
//! The view owns the transient UI state for the table it displays: the
//! submitted search query, the active sorting, header focus and row
//! selection. Visible rows are recomputed from that state on demand.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, TableState},
    Frame,
};
use tracing::debug;

use crate::api::{Item, Table};
use crate::query::{self, Sorting};
use crate::ui::components::{SearchAction, SearchBar, TableRender};
use crate::ui::theme::theme;

/// A searchable, sortable view over a single table.
#[derive(Debug)]
pub struct TableView {
    /// The displayed table. Never mutated.
    table: Table,
    /// Columns derived from the table's items.
    columns: Vec<String>,
    /// The submitted search query.
    query: String,
    /// The active sorting.
    sorting: Sorting,
    /// The buffered search box.
    search: SearchBar,
    /// Header cell with keyboard focus.
    focused_column: usize,
    /// Row selection and scroll offset.
    table_state: TableState,
}

impl TableView {
    /// Create a view for `table` with an empty query, sorted by `id` ascending.
    pub fn new(table: Table) -> Self {
        let columns = table.columns();
        let mut table_state = TableState::default();
        if !table.items.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            table,
            columns,
            query: String::new(),
            sorting: Sorting::default(),
            search: SearchBar::new(),
            focused_column: 0,
            table_state,
        }
    }

    /// Swap in a reloaded copy of the same table, keeping query and sorting.
    pub fn replace_table(&mut self, table: Table) {
        self.columns = table.columns();
        self.table = table;
        self.focused_column = self
            .focused_column
            .min(self.columns.len().saturating_sub(1));
        self.reset_selection();
    }

    /// The displayed table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The displayed columns.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The submitted search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The active sorting.
    pub fn sorting(&self) -> &Sorting {
        &self.sorting
    }

    /// Index of the header cell with keyboard focus.
    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    /// Whether the search box currently has focus.
    pub fn is_editing(&self) -> bool {
        self.search.is_editing()
    }

    /// Apply a submitted search query.
    pub fn submit_search(&mut self, value: impl Into<String>) {
        self.query = value.into();
        debug!(query = %self.query, "Search submitted");
        self.reset_selection();
    }

    /// Activate the header of `column`.
    ///
    /// The same column flips the direction; a different column starts
    /// ascending.
    pub fn click_header(&mut self, column: &str) {
        self.sorting.toggle(column);
        if let Some(idx) = self.columns.iter().position(|c| c == column) {
            self.focused_column = idx;
        }
        debug!(column = %self.sorting.column, order = ?self.sorting.order, "Sorting changed");
        self.reset_selection();
    }

    /// Activate the header at `index`. Out-of-range indices are ignored.
    pub fn click_header_at(&mut self, index: usize) {
        if let Some(column) = self.columns.get(index).cloned() {
            self.click_header(&column);
        }
    }

    /// The rows to display: the filtered items, sorted.
    pub fn visible_items(&self) -> Vec<&Item> {
        query::sort(query::filter(&self.table.items, &self.query), &self.sorting)
    }

    /// The currently selected row, if any.
    pub fn selected_item(&self) -> Option<&Item> {
        let idx = self.table_state.selected()?;
        self.visible_items().get(idx).copied()
    }

    /// Index of the selected row in the visible rows.
    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn reset_selection(&mut self) {
        let has_rows = !self.visible_items().is_empty();
        self.table_state = TableState::default();
        if has_rows {
            self.table_state.select(Some(0));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_items().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    fn move_focus(&mut self, delta: isize) {
        if self.columns.is_empty() {
            return;
        }
        let last = self.columns.len() as isize - 1;
        self.focused_column = (self.focused_column as isize + delta).clamp(0, last) as usize;
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the key was consumed by the view.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if self.search.is_editing() {
            match self.search.handle_input(key) {
                Some(SearchAction::Submit(value)) => self.submit_search(value),
                Some(SearchAction::Cancel) => debug!("Search edit cancelled"),
                None => {}
            }
            return true;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('/'), KeyModifiers::NONE) => {
                self.search.start_editing(&self.query);
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_selection(1);
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_selection(-1);
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.move_selection(isize::MIN / 2);
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.move_selection(isize::MAX / 2);
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                self.move_focus(-1);
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                self.move_focus(1);
            }
            (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::NONE) => {
                self.click_header_at(self.focused_column);
            }
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                let index = c as usize - '1' as usize;
                self.click_header_at(index);
            }
            (KeyCode::Esc, _) if !self.query.is_empty() => {
                self.submit_search("");
            }
            _ => return false,
        }
        true
    }

    /// Render the search box and the table into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        self.search.render(frame, chunks[0], &self.query);

        // Copy the selection so the borrow of visible rows stays immutable.
        let mut state = self.table_state.clone();
        let rows = self.visible_items();
        TableRender {
            title: &self.table.title,
            columns: &self.columns,
            rows: &rows,
            sorting: &self.sorting,
            focused_column: self.focused_column,
            query: &self.query,
        }
        .render(frame, chunks[1], &mut state);
        drop(rows);
        self.table_state = state;
    }

    /// Render the status bar for this view.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let visible = self.visible_items().len();
        let total = self.table.items.len();

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.table.title),
                Style::default().fg(Color::Black).bg(t.accent),
            ),
            Span::raw(format!(" {}/{} rows ", visible, total)),
        ];
        if !self.query.is_empty() {
            spans.push(Span::styled(
                format!("[/{}] ", self.query),
                Style::default().fg(t.editing),
            ));
        }
        if let Some(item) = self.selected_item().filter(|i| !i.tags().is_empty()) {
            let tags: Vec<&str> = item.tags().iter().map(|t| t.title.as_str()).collect();
            spans.push(Span::styled(
                format!("#{} tags: {} ", item.id(), tags.join(", ")),
                Style::default().fg(t.accent),
            ));
        }
        spans.push(Span::styled(
            "/ search  ←→ column  s sort  r reload  ? help  q quit",
            Style::default().fg(t.muted),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
