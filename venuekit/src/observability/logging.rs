//! `tracing` subscriber setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::errors::VenueError;

/// Output settings for the global subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub default_filter: String,
    /// Emit one JSON object per line instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: default_filter(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback filter.
    #[must_use]
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// Switches JSON output on or off.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Resolves the effective filter, preferring `RUST_LOG`.
    pub fn env_filter(&self) -> Result<EnvFilter, VenueError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.default_filter)
                .map_err(|e| VenueError::Config(format!("invalid log filter: {e}"))),
        }
    }
}

/// Installs the global subscriber.
///
/// Fails if the filter is invalid or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), VenueError> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| VenueError::Config(format!("logging already initialized: {e}")))
}
