//! Client-side querying of table rows.
//!
//! Searching and sorting are pure functions over borrowed items: neither
//! reorders nor mutates its input, and both return a fresh `Vec` of
//! references so they can be chained.

mod filter;
mod sort;

pub use filter::filter;
pub use sort::sort;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Glyph shown next to a sorted column header.
    pub fn glyph(self) -> &'static str {
        match self {
            SortOrder::Asc => "▴",
            SortOrder::Desc => "▾",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    /// Column key to sort by.
    pub column: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl Sorting {
    /// Sort ascending by `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: SortOrder::Asc,
        }
    }

    /// Sort descending by `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: SortOrder::Desc,
        }
    }

    /// Apply a header activation.
    ///
    /// The same column flips the direction; any other column starts
    /// ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column == column {
            self.order = self.order.toggled();
        } else {
            *self = Sorting::asc(column);
        }
    }
}

impl Default for Sorting {
    fn default() -> Self {
        Sorting::asc("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sorting_is_id_ascending() {
        assert_eq!(Sorting::default(), Sorting::asc("id"));
    }

    #[test]
    fn test_toggle_same_column_flips() {
        let mut sorting = Sorting::asc("title");
        sorting.toggle("title");
        assert_eq!(sorting.order, SortOrder::Desc);
        sorting.toggle("title");
        assert_eq!(sorting.order, SortOrder::Asc);
    }

    #[test]
    fn test_toggle_other_column_resets_to_asc() {
        let mut sorting = Sorting::desc("title");
        sorting.toggle("id");
        assert_eq!(sorting, Sorting::asc("id"));
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(SortOrder::Asc.glyph(), "▴");
        assert_eq!(SortOrder::Desc.glyph(), "▾");
    }
}
