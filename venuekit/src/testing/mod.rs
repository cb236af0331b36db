//! Test doubles for the delete action.
//!
//! `ScriptedTransport` stands in for the server and `RecordingNavigator` for
//! the browser history, so the action can be driven without a network.

mod mocks;

pub use mocks::{RecordingNavigator, ScriptedReply, ScriptedTransport};
