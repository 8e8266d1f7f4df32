//! Shared application state for all routes.

use crate::store::MovieStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieStore>,
    /// Reported by the healthcheck.
    pub env: String,
}

impl AppState {
    pub fn new(movies: Arc<dyn MovieStore>, env: impl Into<String>) -> Self {
        Self {
            movies,
            env: env.into(),
        }
    }
}
