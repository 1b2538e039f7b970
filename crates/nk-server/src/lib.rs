//! Norikae HTTP API server (Axum).
//!
//! Exposes the dialog controller as a single turn endpoint, a one-shot
//! route search, and health monitoring.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::dialog_routes())
        .merge(routes::search_routes())
        .with_state(state)
}
