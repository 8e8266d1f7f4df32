//! Common routes: healthcheck.

use crate::handlers::{healthcheck, method_not_allowed};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(healthcheck).fallback(method_not_allowed))
        .with_state(state)
}
