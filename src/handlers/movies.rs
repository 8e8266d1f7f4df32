//! Movie handlers: list, create, show, update, delete.

use crate::error::AppError;
use crate::extractors::json::JsonBody;
use crate::extractors::query::IdParam;
use crate::movie::{MovieInput, MovieUpdate};
use crate::response::{write_json, Envelope};
use crate::service::MovieService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use std::collections::HashMap;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let (movies, metadata) = MovieService::list(state.movies.as_ref(), &params).await?;
    let env = Envelope::new().with("movies", &movies)?.with("metadata", metadata)?;
    Ok(write_json(StatusCode::OK, &env, HeaderMap::new())?)
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<MovieInput>,
) -> Result<Response, AppError> {
    let movie = MovieService::create(state.movies.as_ref(), input).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/v1/movies/{}", movie.id)) {
        headers.insert(header::LOCATION, location);
    }
    let env = Envelope::new().with("movie", &movie)?;
    Ok(write_json(StatusCode::CREATED, &env, headers)?)
}

pub async fn show(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Response, AppError> {
    let movie = MovieService::read(state.movies.as_ref(), id).await?;
    let env = Envelope::new().with("movie", &movie)?;
    Ok(write_json(StatusCode::OK, &env, HeaderMap::new())?)
}

pub async fn update(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    JsonBody(update): JsonBody<MovieUpdate>,
) -> Result<Response, AppError> {
    let movie = MovieService::update(state.movies.as_ref(), id, update).await?;
    let env = Envelope::new().with("movie", &movie)?;
    Ok(write_json(StatusCode::OK, &env, HeaderMap::new())?)
}

pub async fn delete(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> Result<Response, AppError> {
    MovieService::delete(state.movies.as_ref(), id).await?;
    let env = Envelope::new().with("message", "movie successfully deleted")?;
    Ok(write_json(StatusCode::OK, &env, HeaderMap::new())?)
}
