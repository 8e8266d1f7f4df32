//! Typed errors and HTTP mapping.

use crate::extractors::json::BodyError;
use crate::filters::UnsafeSortParameter;
use crate::response::error_response;
use crate::validator::ValidationErrors;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";
pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
pub const EDIT_CONFLICT_MESSAGE: &str =
    "unable to update the record due to an edit conflict, please try again";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    RecordNotFound,
    #[error("edit conflict")]
    EditConflict,
    #[error(transparent)]
    UnsafeSort(#[from] UnsafeSortParameter),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Body(#[from] BodyError),
    #[error("validation failed: {0:?}")]
    Validation(ValidationErrors),
    #[error("not found")]
    NotFound,
    #[error("edit conflict")]
    EditConflict,
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
    #[error(transparent)]
    UnsafeSort(#[from] UnsafeSortParameter),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::RecordNotFound => AppError::NotFound,
            StoreError::EditConflict => AppError::EditConflict,
            StoreError::UnsafeSort(e) => AppError::UnsafeSort(e),
            StoreError::Db(e) => AppError::Db(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Body(e) => (StatusCode::BAD_REQUEST, Value::String(e.to_string())),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::to_value(errors).unwrap_or(Value::Null),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.into()),
            AppError::EditConflict => (StatusCode::CONFLICT, EDIT_CONFLICT_MESSAGE.into()),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("the {} method is not supported for this resource", method).into(),
            ),
            AppError::UnsafeSort(_) | AppError::Db(_) | AppError::Serialize(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.into())
            }
        };
        error_response(status, message)
    }
}
