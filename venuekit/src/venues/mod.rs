//! Deleting a venue from its detail page.
//!
//! This module provides:
//! - A small page model (elements, `data-*` attributes, clicks)
//! - The transport and navigation seams, with a `reqwest` transport
//! - Configuration with serde defaults and environment overrides
//! - [`DeleteAction`], which sends `DELETE /venues/<id>` and replaces the
//!   page with the site root once the server has answered

mod action;
mod config;
mod models;
mod page;
mod protocols;
#[cfg(feature = "http")]
mod transport;

mod action_tests;

pub use action::DeleteAction;
pub use config::{
    DuplicatePolicy, MissingIdPolicy, NavigationPolicy, VenueClientConfig, ENV_PREFIX,
    UNDEFINED_VENUE_ID,
};
pub use models::{DeleteOutcome, DeleteResponse, DeleteState};
pub use page::{ClickEvent, Element, Page, StaticPage};
pub use protocols::{DeleteTransport, Navigator, TransportResponse};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
