//! Data models for venue deletion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::VenueError;

/// Body of a delete response.
///
/// Only the `success` key is looked at, and only for presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// The server's `success` value, if the body had one.
    pub success: Option<serde_json::Value>,
}

impl DeleteResponse {
    /// Parses a response body.
    ///
    /// Any JSON document is accepted except `null`, which has no fields to
    /// read. Non-object documents simply have no `success`.
    pub fn parse(status: u16, body: &str) -> Result<Self, VenueError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| VenueError::InvalidBody {
                status,
                message: e.to_string(),
            })?;

        if value.is_null() {
            return Err(VenueError::InvalidBody {
                status,
                message: "cannot read 'success' of null".to_string(),
            });
        }

        Ok(Self {
            success: value.get("success").cloned(),
        })
    }

    /// Whether the server reported `success: true`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.success, Some(serde_json::Value::Bool(true)))
    }

    /// The `success` value as JSON, `null` when absent.
    #[must_use]
    pub fn success_value(&self) -> serde_json::Value {
        self.success.clone().unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for DeleteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.success {
            Some(value) => write!(f, "Success: {}", display_string(value)),
            None => f.write_str("Success: undefined"),
        }
    }
}

/// Renders a JSON value the way string concatenation in the page script
/// does: strings unquoted, integral numbers without a fraction, arrays
/// comma-joined with `null` elements left empty, objects opaque.
fn display_string(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // -0.0 prints as 0.
            Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Result of one click, when the click did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The page was replaced with `location`.
    Redirected {
        /// Deleted venue.
        venue_id: String,
        /// Parsed response.
        response: DeleteResponse,
        /// Navigation target.
        location: String,
    },
    /// The server answered but the navigation policy kept the page.
    Stayed {
        /// Targeted venue.
        venue_id: String,
        /// Parsed response.
        response: DeleteResponse,
    },
    /// No request was sent because one is already pending for this venue.
    Skipped {
        /// Targeted venue.
        venue_id: String,
    },
}

impl DeleteOutcome {
    /// The venue the click targeted.
    #[must_use]
    pub fn venue_id(&self) -> &str {
        match self {
            Self::Redirected { venue_id, .. }
            | Self::Stayed { venue_id, .. }
            | Self::Skipped { venue_id } => venue_id,
        }
    }

    /// Whether the page navigated.
    #[must_use]
    pub fn is_redirected(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

/// Lifecycle of a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
    /// Request in flight.
    Pending,
    /// Response parsed and page replaced.
    Redirected,
    /// Response parsed, page kept.
    Stayed,
    /// Duplicate dropped.
    Skipped,
    /// Request or parse failed and was logged.
    Failed,
}

impl DeleteState {
    /// Whether the click is finished.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// State of a finished click.
    #[must_use]
    pub fn from_result(result: &Result<DeleteOutcome, VenueError>) -> Self {
        result.as_ref().map_or(Self::Failed, Self::from)
    }
}

impl From<&DeleteOutcome> for DeleteState {
    fn from(outcome: &DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Redirected { .. } => Self::Redirected,
            DeleteOutcome::Stayed { .. } => Self::Stayed,
            DeleteOutcome::Skipped { .. } => Self::Skipped,
        }
    }
}
