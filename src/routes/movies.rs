//! Movie CRUD routes.

use crate::handlers::movies::{create, delete as delete_handler, list, show, update};
use crate::handlers::method_not_allowed;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn movie_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/movies", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/v1/movies/:id",
            get(show)
                .patch(update)
                .delete(delete_handler)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}
