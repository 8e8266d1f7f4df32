//! Movie operations shared by the HTTP handlers.

use crate::error::AppError;
use crate::extractors::query::{read_csv, read_string};
use crate::filters::{validate_filters, FilterDefaults, Filters};
use crate::metadata::{calculate_metadata, Metadata};
use crate::movie::{validate_movie, Movie, MovieInput, MovieUpdate, MOVIE_SORT_SAFE_LIST};
use crate::store::MovieStore;
use crate::validator::Validator;
use std::collections::HashMap;

/// Page 1, 20 per page, ascending id.
pub const LIST_DEFAULTS: FilterDefaults<'static> = FilterDefaults {
    page: 1,
    page_size: 20,
    sort: "id",
};

pub struct MovieService;

impl MovieService {
    /// List movies from query parameters: `title`, `genres` (CSV), `page`, `page_size`, `sort`.
    pub async fn list(
        store: &dyn MovieStore,
        qs: &HashMap<String, String>,
    ) -> Result<(Vec<Movie>, Metadata), AppError> {
        let mut v = Validator::new();
        let title = read_string(qs, "title", "");
        let genres = read_csv(qs, "genres", &[]);
        let filters = Filters::parse(qs, LIST_DEFAULTS, MOVIE_SORT_SAFE_LIST, &mut v);

        validate_filters(&mut v, &filters);
        if !v.valid() {
            return Err(AppError::Validation(v.into_errors()));
        }

        let (movies, total) = store.get_all(&title, &genres, &filters).await?;
        let metadata = calculate_metadata(total, filters.page, filters.page_size);
        Ok((movies, metadata))
    }

    pub async fn create(store: &dyn MovieStore, input: MovieInput) -> Result<Movie, AppError> {
        let mut movie = Movie::from_input(input);

        let mut v = Validator::new();
        validate_movie(&mut v, &movie);
        if !v.valid() {
            return Err(AppError::Validation(v.into_errors()));
        }

        store.insert(&mut movie).await?;
        tracing::info!(id = movie.id, title = %movie.title, "movie created");
        Ok(movie)
    }

    pub async fn read(store: &dyn MovieStore, id: i64) -> Result<Movie, AppError> {
        Ok(store.get(id).await?)
    }

    /// Apply a partial update; the merged record is validated as a whole.
    pub async fn update(store: &dyn MovieStore, id: i64, update: MovieUpdate) -> Result<Movie, AppError> {
        let mut movie = store.get(id).await?;
        movie.apply(update);

        let mut v = Validator::new();
        validate_movie(&mut v, &movie);
        if !v.valid() {
            return Err(AppError::Validation(v.into_errors()));
        }

        store.update(&mut movie).await?;
        tracing::info!(id, version = movie.version, "movie updated");
        Ok(movie)
    }

    pub async fn delete(store: &dyn MovieStore, id: i64) -> Result<(), AppError> {
        store.delete(id).await?;
        tracing::info!(id, "movie deleted");
        Ok(())
    }
}
