//! The delete-then-redirect action bound to the venue page's delete control.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::config::{
    DuplicatePolicy, MissingIdPolicy, NavigationPolicy, VenueClientConfig, UNDEFINED_VENUE_ID,
};
use super::models::{DeleteOutcome, DeleteResponse, DeleteState};
use super::page::{ClickEvent, Page};
use super::protocols::{DeleteTransport, Navigator};
use crate::errors::VenueError;
use crate::events::{EventSink, NoOpEventSink, VenueEvent, VenueEventKind};

/// Pending delete requests per venue id.
type InFlight = Arc<DashMap<String, usize>>;

/// Releases a venue's pending mark when the request finishes, however it ends.
struct InFlightGuard {
    in_flight: InFlight,
    venue_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Entry::Occupied(mut entry) = self.in_flight.entry(self.venue_id.clone()) {
            if *entry.get() <= 1 {
                entry.remove();
            } else {
                *entry.get_mut() -= 1;
            }
        }
    }
}

/// Deletes the venue named by the clicked control, then leaves the page.
///
/// Each click runs independently: one `DELETE` per click, one log entry and
/// one event per outcome. Failures are logged and returned; they never
/// navigate.
pub struct DeleteAction {
    page: Arc<dyn Page>,
    transport: Arc<dyn DeleteTransport>,
    navigator: Arc<dyn Navigator>,
    sink: Arc<dyn EventSink>,
    config: VenueClientConfig,
    in_flight: InFlight,
}

impl std::fmt::Debug for DeleteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteAction")
            .field("control_id", &self.config.control_id)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl DeleteAction {
    /// Binds to the control `config.control_id` on `page`.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::MissingElement` if the page has no such control.
    pub fn bind(
        page: Arc<dyn Page>,
        transport: Arc<dyn DeleteTransport>,
        navigator: Arc<dyn Navigator>,
        config: VenueClientConfig,
    ) -> Result<Self, VenueError> {
        if page.element_by_id(&config.control_id).is_none() {
            error!(control_id = %config.control_id, "Delete control not found");
            return Err(VenueError::MissingElement(config.control_id));
        }

        debug!(control_id = %config.control_id, "Delete action bound");
        Ok(Self {
            page,
            transport,
            navigator,
            sink: Arc::new(NoOpEventSink),
            config,
            in_flight: Arc::new(DashMap::new()),
        })
    }

    /// Routes outcome events to `sink`.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &VenueClientConfig {
        &self.config
    }

    /// Venue ids with a request in flight, sorted.
    #[must_use]
    pub fn in_flight(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.in_flight.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// `DeleteState::Pending` while a request for `venue_id` is in flight.
    #[must_use]
    pub fn state_of(&self, venue_id: &str) -> Option<DeleteState> {
        self.in_flight
            .contains_key(venue_id)
            .then_some(DeleteState::Pending)
    }

    /// Clicks the bound control as it is on the page right now.
    pub async fn click(&self) -> Result<DeleteOutcome, VenueError> {
        let target = self
            .page
            .element_by_id(&self.config.control_id)
            .ok_or_else(|| VenueError::MissingElement(self.config.control_id.clone()))?;
        self.handle_click(&ClickEvent::on(target)).await
    }

    /// Handles a click on the delete control.
    pub async fn handle_click(&self, event: &ClickEvent) -> Result<DeleteOutcome, VenueError> {
        let request_id = Uuid::new_v4().to_string();

        let venue_id = match (
            event.target.data(&self.config.id_attribute),
            self.config.missing_id,
        ) {
            (Some(venue_id), _) => venue_id.to_string(),
            (None, MissingIdPolicy::SendUndefined) => UNDEFINED_VENUE_ID.to_string(),
            (None, MissingIdPolicy::Reject) => {
                let err = VenueError::MissingVenueId {
                    attribute: self.config.id_attribute.clone(),
                };
                return Err(self.fail("", &request_id, err).await);
            }
        };

        let Some(_guard) = self.claim(&venue_id) else {
            info!(venue_id = %venue_id, request_id = %request_id, "Delete already pending, click ignored");
            self.sink
                .emit(VenueEvent::new(VenueEventKind::DeleteSkipped, &venue_id, &request_id))
                .await;
            return Ok(DeleteOutcome::Skipped { venue_id });
        };

        let response = match self.send(&venue_id, &request_id).await {
            Ok(response) => response,
            Err(err) => return Err(self.fail(&venue_id, &request_id, err).await),
        };

        info!(
            venue_id = %venue_id,
            request_id = %request_id,
            success = %response.success_value(),
            "{response}"
        );
        self.sink
            .emit(
                VenueEvent::new(VenueEventKind::DeleteSucceeded, &venue_id, &request_id)
                    .with_detail(response.success_value()),
            )
            .await;

        let navigate = match self.config.navigation {
            NavigationPolicy::Always => true,
            NavigationPolicy::OnSuccess => response.is_success(),
        };
        if !navigate {
            return Ok(DeleteOutcome::Stayed { venue_id, response });
        }

        let location = self.config.redirect_path.clone();
        self.navigator.replace(&location);
        Ok(DeleteOutcome::Redirected {
            venue_id,
            response,
            location,
        })
    }

    /// Marks `venue_id` as pending, or returns `None` if the duplicate
    /// policy drops this click.
    fn claim(&self, venue_id: &str) -> Option<InFlightGuard> {
        match (self.in_flight.entry(venue_id.to_string()), self.config.duplicates) {
            (Entry::Occupied(_), DuplicatePolicy::Block) => return None,
            (Entry::Occupied(mut entry), DuplicatePolicy::Allow) => *entry.get_mut() += 1,
            (Entry::Vacant(entry), _) => {
                entry.insert(1);
            }
        }
        Some(InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            venue_id: venue_id.to_string(),
        })
    }

    /// Sends the request and parses the body, in that order.
    async fn send(&self, venue_id: &str, request_id: &str) -> Result<DeleteResponse, VenueError> {
        let url = self.config.delete_url(venue_id);
        debug!(venue_id = %venue_id, request_id = %request_id, url = %url, "Sending DELETE");

        let response = self.transport.delete(&url).await?;
        DeleteResponse::parse(response.status_code, &response.body)
    }

    async fn fail(&self, venue_id: &str, request_id: &str, err: VenueError) -> VenueError {
        error!(
            venue_id = %venue_id,
            request_id = %request_id,
            error_kind = err.kind(),
            "Venue delete failed: {err}"
        );
        self.sink
            .emit(
                VenueEvent::new(VenueEventKind::DeleteFailed, venue_id, request_id)
                    .with_detail(serde_json::json!({
                        "kind": err.kind(),
                        "message": err.to_string(),
                    })),
            )
            .await;
        err
    }
}
