//! Centralized error types for LazyTables.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (terminal setup, log directory, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Short heading identifying the kind of failure.
    pub fn title(&self) -> String {
        match self {
            AppError::Config(ConfigError::MissingBaseUrl) => "API URL not configured".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Api(ApiError::Network(_)) => "Network failure".to_string(),
            AppError::Api(ApiError::Http { status, .. }) => format!("HTTP error {}", status),
            AppError::Api(ApiError::Decode(_)) => "Invalid response".to_string(),
            AppError::Api(ApiError::InvalidUrl(_)) => "Invalid API URL".to_string(),
            AppError::Io(_) => "I/O error".to_string(),
            AppError::Terminal(_) => "Terminal error".to_string(),
        }
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::MissingBaseUrl => "No API base URL is configured.".to_string(),
            },
            AppError::Api(e) => match e {
                ApiError::Network(_) => {
                    "Could not reach the tables API. Please check your connection.".to_string()
                }
                ApiError::Http { status, message } => {
                    format!("The server answered with HTTP {}: {}", status, message)
                }
                ApiError::Decode(msg) => {
                    format!("The server sent a response that could not be read: {}", msg)
                }
                ApiError::InvalidUrl(url) => format!("'{}' is not a usable API URL.", url),
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error is recoverable by a user-initiated reload.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::Network(_))
                | AppError::Api(ApiError::Http { .. })
                | AppError::Api(ApiError::Decode(_))
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::MissingBaseUrl) => {
                Some("Set LAZYTABLES_API_BASE_URL or pass --api-url.")
            }
            AppError::Api(ApiError::Network(_)) => {
                Some("Check that the API server is running, then press 'r' to reload.")
            }
            AppError::Api(e @ ApiError::Http { .. }) if e.is_server_error() => {
                Some("The server failed. Press 'r' to try again.")
            }
            AppError::Api(ApiError::Http { .. }) => {
                Some("Check the API base URL, then press 'r' to reload.")
            }
            AppError::Api(ApiError::Decode(_)) => {
                Some("Check that the base URL points at the tables API, then press 'r' to reload.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
