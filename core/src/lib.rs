//! Client-side support for the shop admin pages.
//!
//! # Overview
//! The centre is [`RequestHelper`]: one JSON call against
//! `<origin>/api/<endpoint>` with a busy indicator shown while it is in
//! flight, failure messages normalized from the response body, and failures
//! reported to the user before being returned to the caller.
//!
//! # Design
//! - `ApiClient` is sans-IO: `build_request` produces an `HttpRequest`,
//!   `parse_response` consumes an `HttpResponse`. A `Transport` executes the
//!   round-trip in between (`UreqTransport` by default).
//! - The busy indicator and the failure reporter are injected, not global.
//!   `LoadingOverlay` counts in-flight calls so overlapping calls compose.
//! - `sidebar` and `confirm` hold the small bits of page state the admin
//!   layout needs.

pub mod busy;
pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod helper;
pub mod http;
pub mod report;
pub mod resources;
pub mod sidebar;
pub mod transport;
pub mod types;

pub use busy::{BusyGuard, BusyIndicator, LoadingOverlay, NoBusyIndicator};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use confirm::{intercept, ActionTarget, Confirmer, Disposition};
pub use error::ApiError;
pub use helper::RequestHelper;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use report::{alert_text, ErrorReporter, TracingReporter};
pub use resources::{Categories, Products, Users};
pub use sidebar::Sidebar;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Category, CategoryRequest, CategoryResponse, Page, ProductDetail, ProductRequest, ProductResponse, ProductSearch,
    Role, UpdateProductStatusRequest, UpdateUserRequest, UpdateUserRoleRequest, User,
};
