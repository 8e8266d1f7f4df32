use crate::error::AppError;
use crate::response::{write_json, Envelope};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde::Serialize;

#[derive(Serialize)]
struct SystemInfo<'a> {
    environment: &'a str,
    version: &'static str,
}

pub async fn healthcheck(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = Envelope::new().with("status", "available")?.with(
        "system_info",
        SystemInfo {
            environment: &state.env,
            version: env!("CARGO_PKG_VERSION"),
        },
    )?;
    Ok(write_json(StatusCode::OK, &body, HeaderMap::new())?)
}
