//! Data table widget.
//!
//! Renders one header row (with a sort glyph on the sorted column) and one
//! body row per visible item.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::search_bar::highlight_text;
use crate::api::Item;
use crate::query::Sorting;
use crate::ui::theme::theme;

/// Minimum width of a column, in cells.
const MIN_COLUMN_WIDTH: u16 = 4;

/// Maximum width of a column, in cells.
const MAX_COLUMN_WIDTH: u16 = 40;

/// Header label for `column`: the name plus `▴`/`▾` when it is the sort column.
pub fn header_label(column: &str, sorting: &Sorting) -> String {
    if sorting.column == column {
        format!("{} {}", column, sorting.order.glyph())
    } else {
        column.to_string()
    }
}

/// Compute a width per column from the header label and cell contents.
fn column_widths(columns: &[String], rows: &[&Item], sorting: &Sorting) -> Vec<Constraint> {
    columns
        .iter()
        .map(|column| {
            let header = header_label(column, sorting).chars().count();
            let widest = rows
                .iter()
                .filter_map(|item| item.get(column))
                .map(|value| value.to_string().chars().count())
                .max()
                .unwrap_or(0);
            let width = header
                .max(widest)
                .clamp(MIN_COLUMN_WIDTH as usize, MAX_COLUMN_WIDTH as usize);
            Constraint::Length(width as u16)
        })
        .collect()
}

/// Everything the table widget needs for one frame.
pub struct TableRender<'a> {
    /// Block title.
    pub title: &'a str,
    /// Columns in display order.
    pub columns: &'a [String],
    /// Rows, already filtered and sorted.
    pub rows: &'a [&'a Item],
    /// Active sort.
    pub sorting: &'a Sorting,
    /// Header cell with keyboard focus.
    pub focused_column: usize,
    /// Active query, used to highlight matches.
    pub query: &'a str,
}

impl TableRender<'_> {
    /// Render into `area`, using `state` for row selection and scrolling.
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut TableState) {
        let t = theme();

        let header = Row::new(self.columns.iter().enumerate().map(|(i, column)| {
            let style = if i == self.focused_column {
                Style::default()
                    .fg(t.focused_header)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
            };
            Cell::from(header_label(column, self.sorting)).style(style)
        }))
        .height(1);

        let body = self.rows.iter().map(|item| {
            Row::new(self.columns.iter().map(|column| {
                let text = item.get(column).map(|v| v.to_string()).unwrap_or_default();
                Cell::from(Text::from(highlight_text(&text, self.query)))
            }))
        });

        let widths = column_widths(self.columns, self.rows, self.sorting);
        let table = Table::new(body, widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.muted)),
            )
            .highlight_style(Style::default().bg(t.highlight).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CellValue;

    #[test]
    fn test_header_label_marks_sorted_column() {
        let sorting = Sorting::asc("title");
        assert_eq!(header_label("title", &sorting), "title ▴");
        assert_eq!(header_label("id", &sorting), "id");

        let sorting = Sorting::desc("title");
        assert_eq!(header_label("title", &sorting), "title ▾");
    }

    #[test]
    fn test_column_widths_fit_content_within_bounds() {
        let long = "x".repeat(100);
        let items = vec![Item::new(
            1,
            "ab",
            [("note".to_string(), CellValue::Text(long))],
        )];
        let rows: Vec<&Item> = items.iter().collect();
        let columns = vec!["id".to_string(), "title".to_string(), "note".to_string()];

        let widths = column_widths(&columns, &rows, &Sorting::asc("id"));
        assert_eq!(widths[0], Constraint::Length(MIN_COLUMN_WIDTH));
        assert_eq!(widths[1], Constraint::Length(5));
        assert_eq!(widths[2], Constraint::Length(MAX_COLUMN_WIDTH));
    }

    #[test]
    fn test_column_width_of_huge_cell_is_capped_not_wrapped() {
        // One past u16::MAX characters must not wrap to a tiny width.
        let huge = "x".repeat(u16::MAX as usize + 1);
        let items = vec![Item::new(
            1,
            "a",
            [("blob".to_string(), CellValue::Text(huge))],
        )];
        let rows: Vec<&Item> = items.iter().collect();
        let columns = vec!["blob".to_string()];

        let widths = column_widths(&columns, &rows, &Sorting::asc("id"));
        assert_eq!(widths[0], Constraint::Length(MAX_COLUMN_WIDTH));
    }
}
