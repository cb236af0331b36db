//! Stateless utility functions.
//!
//! Currently this is the timestamp parser used by pages that receive
//! loosely formatted ISO strings from the server.

pub mod timestamps;

pub use timestamps::{
    format_iso8601, parse_iso_string, try_parse_iso_string, Timestamp, TimestampError,
    TimestampFields,
};
