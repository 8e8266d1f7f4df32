//! Query-string and path parameter helpers.

use crate::error::AppError;
use crate::validator::Validator;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

/// Value for `key`, or `default` when absent or empty.
pub fn read_string(qs: &HashMap<String, String>, key: &str, default: &str) -> String {
    match qs.get(key) {
        Some(s) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

/// Comma-separated values for `key`, or `default` when absent or empty.
pub fn read_csv(qs: &HashMap<String, String>, key: &str, default: &[&str]) -> Vec<String> {
    match qs.get(key) {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// Base-10 integer for `key`. A malformed value records an error on `key` and yields `default`.
pub fn read_int(qs: &HashMap<String, String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    let s = match qs.get(key) {
        Some(s) if !s.is_empty() => s,
        _ => return default,
    };
    match s.parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            v.add_error(key, "must be an integer value");
            default
        }
    }
}

/// Record id from a path segment. Anything but a positive integer is treated as not found.
pub fn read_id_param(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::NotFound),
    }
}

/// Record id taken from the `:id` path segment.
///
/// A segment that cannot be decoded (e.g. `%FF`) is rejected the same way as a non-positive
/// or non-numeric one: not found, in the usual `{"error": ...}` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParam(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected id path segment");
                AppError::NotFound
            })?;
        read_id_param(&raw).map(IdParam)
    }
}
