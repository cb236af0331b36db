//! # Venuekit
//!
//! Client-side helpers for the venue listings app.
//!
//! Venuekit provides:
//!
//! - **Timestamp parsing**: turn loosely delimited ISO-like strings from the
//!   server into UTC instants, with an explicit invalid-date result
//! - **Venue deletion**: a delete action bound to the venue page's delete
//!   control that sends `DELETE /venues/<id>` and replaces the page with the
//!   site root once the server answers
//! - **Observability**: `tracing` output plus one outcome event per click
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use venuekit::prelude::*;
//!
//! let ts = parse_iso_string("2021-03-15T10:30:00.500Z");
//!
//! let config = VenueClientConfig::from_env()?;
//! let action = DeleteAction::bind(
//!     Arc::new(page),
//!     Arc::new(ReqwestTransport::new(&config)?),
//!     Arc::new(navigator),
//!     config,
//! )?;
//! let outcome = action.click().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod events;
pub mod observability;
pub mod testing;
pub mod utils;
pub mod venues;

pub use utils::{parse_iso_string, Timestamp};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::VenueError;
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::utils::{
        format_iso8601, parse_iso_string, try_parse_iso_string, Timestamp, TimestampError,
    };
    #[cfg(feature = "http")]
    pub use crate::venues::ReqwestTransport;
    pub use crate::venues::{
        ClickEvent, DeleteAction, DeleteOutcome, DeleteState, DeleteTransport, DuplicatePolicy,
        Element, MissingIdPolicy, NavigationPolicy, Navigator, Page, StaticPage,
        VenueClientConfig,
    };
    pub use std::sync::Arc;
}
