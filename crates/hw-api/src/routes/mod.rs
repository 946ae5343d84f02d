//! API routes.

pub mod health;
pub mod hooks;
pub mod metrics;

use axum::Router;

use crate::state::AppState;

/// Creates the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/hooks", hooks::routes())
        .merge(health::routes())
        .merge(metrics::routes())
        .with_state(state)
}
