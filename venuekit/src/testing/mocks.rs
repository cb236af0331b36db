//! In-memory transport and navigator doubles.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::errors::VenueError;
use crate::venues::{DeleteTransport, Navigator, TransportResponse};

/// One scripted reply of a [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Answer with a response.
    Respond(TransportResponse),
    /// Reject the request with a network error.
    Reject(String),
}

impl ScriptedReply {
    /// A 200 response with a JSON body.
    #[must_use]
    pub fn json(body: serde_json::Value) -> Self {
        Self::Respond(TransportResponse::new(200, body.to_string()))
    }

    /// A response with an arbitrary status and body.
    #[must_use]
    pub fn raw(status_code: u16, body: impl Into<String>) -> Self {
        Self::Respond(TransportResponse::new(status_code, body))
    }

    /// A rejected request.
    #[must_use]
    pub fn reject(message: impl Into<String>) -> Self {
        Self::Reject(message.into())
    }
}

/// A transport that replays scripted replies and records requested URLs.
///
/// Replies are consumed in order; once exhausted, the fallback reply is used
/// for every further request.
#[derive(Debug)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    fallback: ScriptedReply,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// Creates a transport answering `{"success": true}` to everything.
    #[must_use]
    pub fn new() -> Self {
        Self::always(ScriptedReply::json(serde_json::json!({ "success": true })))
    }

    /// Creates a transport answering `reply` to everything.
    #[must_use]
    pub fn always(reply: ScriptedReply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: reply,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a reply ahead of the fallback.
    #[must_use]
    pub fn then(self, reply: ScriptedReply) -> Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Delays every reply, keeping requests in flight for a while.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of requests sent.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeleteTransport for ScriptedTransport {
    async fn delete(&self, url: &str) -> Result<TransportResponse, VenueError> {
        self.requests.lock().push(url.to_string());
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            ScriptedReply::Respond(response) => Ok(response),
            ScriptedReply::Reject(message) => Err(VenueError::Network(message)),
        }
    }
}

/// A navigator that records every location it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    locations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates an empty navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locations navigated to, oldest first.
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        self.locations.lock().clone()
    }

    /// The most recent location.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.locations.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, location: &str) {
        self.locations.lock().push(location.to_string());
    }
}
