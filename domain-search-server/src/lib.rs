//! HTTP front-end for domain-search-lib.
//!
//! Serves the form endpoint a site's search box posts to, answering with the
//! `{"success": ..., "data": ...}` envelope.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::timing_safe_eq;
pub use routes::create_router;
pub use state::AppState;
