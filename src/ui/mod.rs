//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including the table view and
//! the reusable components it is built from.

mod components;
pub mod theme;
mod views;

pub use components::{render_error_panel, LoadingIndicator};
pub use views::{HelpAction, HelpView, TableView};
