//! Client data layer for the WinLearn learning platform.
//!
//! Everything a portal front-end binds to, with the rendering left out:
//!
//! - [`api::ApiClient`] — direct HTTP calls to the WinLearn REST backend,
//!   bearer token attached from the session. No retries, no offline queue;
//!   the backend owns all business logic and persistence.
//! - [`session::Session`] — the explicit session context: token and profile,
//!   initialized once at login, cleared once at logout.
//! - [`state::ClientState`] — session-lifetime in-memory caches of the most
//!   recently fetched collections, one per entity kind.
//! - [`projection`] — pure filters, sorts, grouping, and dashboard
//!   aggregates over cache snapshots.
//! - [`mutation`] — the optimistic-mutation coordinator: provisional apply,
//!   commit on success, revert on failure.
//! - [`sync`] — fetch-and-replace loaders guarded against stale responses.
//! - [`gate`] — declarative role-based route gating.
//!
//! A typical view mounts like this:
//!
//! ```no_run
//! use winlearn_client::api::ApiClient;
//! use winlearn_client::config::ClientConfig;
//! use winlearn_client::session::{Portal, Session};
//! use winlearn_client::state::ClientState;
//! use winlearn_client::sync;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new();
//! let client = ApiClient::new(&ClientConfig::resolve()?, session.clone())?;
//! let state = ClientState::new();
//!
//! let me = client.login("alice@example.com", "secret", Portal::Employee).await?;
//! let scope = state.current_scope();
//! sync::load_employee_progress(&client, &state, scope, me.employee_id).await?;
//!
//! let snapshot = state.progress.snapshot();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod gate;
pub mod mutation;
pub mod projection;
pub mod session;
pub mod state;
pub mod sync;
pub mod types;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use gate::{evaluate as evaluate_route, GateDecision};
pub use mutation::{advance_progress, decide_request, MutationError};
pub use session::{Portal, Session};
pub use state::{ClientState, DecisionKind, ListStore, ViewScope};
pub use types::{
    BrownBagRequest, CatalogCourse, EmployeeProfile, ProgressRecord, ProgressStatus,
    RequestStatus, Role, TrainingRequest,
};
