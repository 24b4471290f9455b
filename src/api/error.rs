//! API error types for the tables client.

use thiserror::Error;

/// Errors that can occur when talking to the tables API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, DNS, timeout, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// Error message from the response body, or the request URL.
        message: String,
    },

    /// The body was not valid JSON or did not have the expected shape.
    #[error("Invalid API response: {0}")]
    Decode(String),

    /// The base URL could not be used to build a request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        ApiError::Http {
            status: status.as_u16(),
            message: context.to_string(),
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this is a server-side (5xx) failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Http { status, .. } if (500..=599).contains(status))
    }
}
