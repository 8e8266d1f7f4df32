//! HTTP handlers for the movie resource and the healthcheck.

pub mod health;
pub mod movies;
pub use health::*;
pub use movies::*;

use crate::error::AppError;
use axum::http::Method;

/// Router fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Method fallback for known paths.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
