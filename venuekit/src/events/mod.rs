//! Outcome events for delete clicks.
//!
//! Every click on the delete control produces exactly one event, which makes
//! the diagnostic channel observable in tests and dashboards.

mod sink;

pub use sink::{
    CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, VenueEvent, VenueEventKind,
};
