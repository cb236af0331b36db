//! Event sink trait and implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueEventKind {
    /// The server answered with a JSON body.
    #[serde(rename = "venue.delete.succeeded")]
    DeleteSucceeded,
    /// The request or the body parse failed.
    #[serde(rename = "venue.delete.failed")]
    DeleteFailed,
    /// The click was dropped because a delete for the same venue is pending.
    #[serde(rename = "venue.delete.skipped")]
    DeleteSkipped,
}

impl VenueEventKind {
    /// Dotted event type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeleteSucceeded => "venue.delete.succeeded",
            Self::DeleteFailed => "venue.delete.failed",
            Self::DeleteSkipped => "venue.delete.skipped",
        }
    }
}

/// One outcome of a click on the delete control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueEvent {
    /// Outcome kind.
    pub kind: VenueEventKind,
    /// Venue the click targeted.
    pub venue_id: String,
    /// Per-click request id.
    pub request_id: String,
    /// Outcome details: the server's `success` value, or the error.
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl VenueEvent {
    /// Creates an event with no details.
    #[must_use]
    pub fn new(
        kind: VenueEventKind,
        venue_id: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            venue_id: venue_id.into(),
            request_id: request_id.into(),
            detail: serde_json::Value::Null,
        }
    }

    /// Attaches details.
    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = detail;
        self
    }
}

/// Receives delete outcomes.
///
/// Sinks must not fail: a sink that cannot deliver an event drops it.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event.
    async fn emit(&self, event: VenueEvent);
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: VenueEvent) {}
}

/// A sink that writes events through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink at the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: VenueEvent) {
        if self.level == Level::DEBUG {
            debug!(
                event_type = event.kind.as_str(),
                venue_id = %event.venue_id,
                request_id = %event.request_id,
                detail = %event.detail,
                "Event: {}", event.kind.as_str()
            );
        } else {
            info!(
                event_type = event.kind.as_str(),
                venue_id = %event.venue_id,
                request_id = %event.request_id,
                detail = %event.detail,
                "Event: {}", event.kind.as_str()
            );
        }
    }
}

/// A sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<VenueEvent>>,
}

impl CollectingEventSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<VenueEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Returns events of one kind.
    #[must_use]
    pub fn events_of_kind(&self, kind: VenueEventKind) -> Vec<VenueEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: VenueEvent) {
        self.events.write().push(event);
    }
}
