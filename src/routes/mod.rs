//! Router assembly.

mod common;
mod movies;
pub use common::common_routes;
pub use movies::movie_routes;

use crate::handlers::not_found;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: healthcheck, movies, JSON 404 fallback, request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(movie_routes(state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}
