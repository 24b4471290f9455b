//! Configuration management for LazyTables.
//!
//! Settings come from an optional TOML file. The API base URL can be
//! overridden by the `LAZYTABLES_API_BASE_URL` environment variable and by
//! the `--api-url` flag, in increasing order of precedence. A missing base URL
//! is a startup error.

mod settings;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Environment variable supplying the API origin.
pub const BASE_URL_ENV: &str = "LAZYTABLES_API_BASE_URL";

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file is not valid TOML for `Config`.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// No API base URL from flag, environment or file.
    #[error("API base URL is not set (use --api-url, LAZYTABLES_API_BASE_URL, or api_base_url in the config file)")]
    MissingBaseUrl,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The on-disk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

/// Resolved connection settings handed to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API origin without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create an API config with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(settings::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Get the default config file path.
    ///
    /// `~/.config/lazytables/config.toml` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("lazytables").join("config.toml"))
    }

    /// Load the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load the config from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve the API settings, reading the base URL from the environment.
    pub fn resolve_api(&self, cli_url: Option<&str>) -> Result<ApiConfig> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        self.resolve_api_with(cli_url, env_url.as_deref())
    }

    /// Resolve the API settings from explicit sources.
    ///
    /// Precedence: `cli_url`, then `env_url`, then the file. Blank values
    /// count as unset.
    pub fn resolve_api_with(&self, cli_url: Option<&str>, env_url: Option<&str>) -> Result<ApiConfig> {
        let base_url = [cli_url, env_url, self.settings.api_base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "API base URL '{}' must start with http:// or https://",
                base_url
            )));
        }

        if self.settings.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ApiConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(self.settings.request_timeout_secs),
        })
    }
}
