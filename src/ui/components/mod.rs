//! Reusable UI components.

mod error_panel;
mod input;
mod loading;
mod search_bar;
mod table;

pub use error_panel::render_error_panel;
pub use loading::LoadingIndicator;
pub use search_bar::{SearchAction, SearchBar};
pub use table::TableRender;
