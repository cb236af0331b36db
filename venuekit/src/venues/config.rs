//! Configuration for the venue delete action.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::errors::VenueError;

/// Prefix of environment variables read by [`VenueClientConfig::from_env`].
pub const ENV_PREFIX: &str = "VENUEKIT_";

/// When to leave the page after the server answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPolicy {
    /// Redirect after any parseable response, whatever `success` says.
    #[default]
    Always,
    /// Redirect only when the response reports `success: true`.
    OnSuccess,
}

/// How to treat a click while a delete for the same venue is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Every click sends its own request.
    #[default]
    Allow,
    /// Clicks for a venue with a request in flight are dropped.
    Block,
}

/// What a click does when the control carries no venue id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdPolicy {
    /// Send the request with the id `undefined`, as the page script does.
    #[default]
    SendUndefined,
    /// Fail the click with [`VenueError::MissingVenueId`] and send nothing.
    Reject,
}

/// Venue id sent when the control has no id attribute.
pub const UNDEFINED_VENUE_ID: &str = "undefined";

/// Settings for [`super::DeleteAction`] and [`super::ReqwestTransport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueClientConfig {
    /// Origin of the venues app.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix the venue id is appended to.
    #[serde(default = "default_resource_path")]
    pub resource_path: String,
    /// Location that replaces the page after a delete.
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,
    /// Element id of the delete control.
    #[serde(default = "default_control_id")]
    pub control_id: String,
    /// Data attribute holding the venue id, without the `data-` prefix.
    #[serde(default = "default_id_attribute")]
    pub id_attribute: String,
    /// Request timeout in seconds. Unset leaves the lifetime to the HTTP stack.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Additional request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Redirect policy.
    #[serde(default)]
    pub navigation: NavigationPolicy,
    /// Duplicate click policy.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    /// Missing venue id policy.
    #[serde(default)]
    pub missing_id: MissingIdPolicy,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_resource_path() -> String {
    "/venues/".to_string()
}

fn default_redirect_path() -> String {
    "/".to_string()
}

fn default_control_id() -> String {
    "deleteBtn".to_string()
}

fn default_id_attribute() -> String {
    "id".to_string()
}

fn default_user_agent() -> String {
    concat!("venuekit/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for VenueClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource_path: default_resource_path(),
            redirect_path: default_redirect_path(),
            control_id: default_control_id(),
            id_attribute: default_id_attribute(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
            headers: HashMap::new(),
            navigation: NavigationPolicy::default(),
            duplicates: DuplicatePolicy::default(),
            missing_id: MissingIdPolicy::default(),
        }
    }
}

impl VenueClientConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON configuration file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VenueError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Applies `VENUEKIT_*` environment overrides on top of the defaults.
    pub fn from_env() -> Result<Self, VenueError> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, VenueError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("RESOURCE_PATH") {
            self.resource_path = v;
        }
        if let Some(v) = var("REDIRECT_PATH") {
            self.redirect_path = v;
        }
        if let Some(v) = var("CONTROL_ID") {
            self.control_id = v;
        }
        if let Some(v) = var("TIMEOUT_SECONDS") {
            let secs = v
                .parse::<f64>()
                .ok()
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .ok_or_else(|| VenueError::Config(format!("invalid timeout: {v}")))?;
            self.timeout_seconds = Some(secs);
        }
        if let Some(v) = var("NAVIGATION") {
            self.navigation = match v.as_str() {
                "always" => NavigationPolicy::Always,
                "on_success" => NavigationPolicy::OnSuccess,
                other => {
                    return Err(VenueError::Config(format!(
                        "invalid navigation policy: {other}"
                    )))
                }
            };
        }
        if let Some(v) = var("DUPLICATES") {
            self.duplicates = match v.as_str() {
                "allow" => DuplicatePolicy::Allow,
                "block" => DuplicatePolicy::Block,
                other => {
                    return Err(VenueError::Config(format!(
                        "invalid duplicate policy: {other}"
                    )))
                }
            };
        }
        if let Some(v) = var("MISSING_ID") {
            self.missing_id = match v.as_str() {
                "send_undefined" => MissingIdPolicy::SendUndefined,
                "reject" => MissingIdPolicy::Reject,
                other => {
                    return Err(VenueError::Config(format!(
                        "invalid missing id policy: {other}"
                    )))
                }
            };
        }
        Ok(self)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the navigation policy.
    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationPolicy) -> Self {
        self.navigation = navigation;
        self
    }

    /// Sets the duplicate click policy.
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Sets the missing venue id policy.
    #[must_use]
    pub fn with_missing_id(mut self, missing_id: MissingIdPolicy) -> Self {
        self.missing_id = missing_id;
        self
    }

    /// Gets the timeout as a `Duration`.
    ///
    /// Negative, NaN and infinite values are a configuration error.
    pub fn timeout(&self) -> Result<Option<Duration>, VenueError> {
        self.timeout_seconds
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|err| VenueError::Config(format!("invalid timeout {secs}: {err}")))
            })
            .transpose()
    }

    /// URL of the delete endpoint for `venue_id`.
    ///
    /// The id is appended verbatim, without escaping.
    #[must_use]
    pub fn delete_url(&self, venue_id: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.resource_path,
            venue_id
        )
    }
}
