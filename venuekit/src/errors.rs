//! Error types for venuekit.
//!
//! Timestamp parsing has its own error in [`crate::utils::TimestampError`];
//! everything that touches the page, the network or configuration is a
//! [`VenueError`].

use thiserror::Error;

/// The main error type for venue operations.
#[derive(Debug, Error)]
pub enum VenueError {
    /// The control the action binds to is not on the page.
    #[error("Element not found: #{0}")]
    MissingElement(String),

    /// The clicked control carries no venue id attribute.
    #[error("Clicked element has no data-{attribute} attribute")]
    MissingVenueId {
        /// Name of the expected data attribute.
        attribute: String,
    },

    /// The request was rejected before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body is not the expected JSON.
    #[error("Invalid response body (status {status}): {message}")]
    InvalidBody {
        /// HTTP status of the response.
        status: u16,
        /// Parser message.
        message: String,
    },

    /// A request URL could not be formed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configuration value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VenueError {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingElement(_) => "missing_element",
            Self::MissingVenueId { .. } => "missing_venue_id",
            Self::Network(_) => "network",
            Self::InvalidBody { .. } => "invalid_body",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for VenueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
