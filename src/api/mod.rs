//! Tables API client and types.
//!
//! This module provides the interface for communicating with the tables REST API.

mod client;
pub mod error;
pub mod types;

pub use client::TablesClient;
pub use error::ApiError;
pub use types::{CellValue, Item, Table, Tag};
