//! Seams of the delete action: the HTTP transport and page navigation.

use async_trait::async_trait;

use crate::errors::VenueError;

/// A response as received from the server, before any body parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// Sends DELETE requests.
///
/// Any response, whatever its status, is `Ok`. `Err` means the request was
/// rejected before a response arrived.
#[async_trait]
pub trait DeleteTransport: Send + Sync {
    /// Sends `DELETE url`.
    async fn delete(&self, url: &str) -> Result<TransportResponse, VenueError>;
}

/// Moves the page to another location.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Replaces the current history entry with `location`, so the back
    /// button does not return to the current page.
    fn replace(&self, location: &str);
}
