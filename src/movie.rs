//! Movie record, write payloads, and field validation.

use crate::validator::{unique, Validator};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Columns a client may sort the movie list by.
pub const MOVIE_SORT_SAFE_LIST: &[&str] = &[
    "id", "title", "year", "runtime", "-id", "-title", "-year", "-runtime",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    /// Minutes.
    pub runtime: i32,
    pub genres: Vec<String>,
    pub version: i32,
}

/// Body of `POST /v1/movies`. Absent fields decode to zero values and are caught by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    pub runtime: i32,
    pub genres: Vec<String>,
}

/// Body of `PATCH /v1/movies/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<i32>,
    pub genres: Option<Vec<String>>,
}

impl Movie {
    /// Unsaved movie; the store assigns `id`, `created_at` and `version`.
    pub fn from_input(input: MovieInput) -> Self {
        Movie {
            id: 0,
            created_at: Utc::now(),
            title: input.title,
            year: input.year,
            runtime: input.runtime,
            genres: input.genres,
            version: 0,
        }
    }

    pub fn apply(&mut self, update: MovieUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(runtime) = update.runtime {
            self.runtime = runtime;
        }
        if let Some(genres) = update.genres {
            self.genres = genres;
        }
    }
}

pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(movie.title.len() <= 500, "title", "must not be more than 500 bytes long");

    v.check(movie.year != 0, "year", "must be provided");
    v.check(movie.year >= 1888, "year", "must be greater than 1888");
    v.check(movie.year <= Utc::now().year(), "year", "must not be in the future");

    v.check(movie.runtime != 0, "runtime", "must be provided");
    v.check(movie.runtime > 0, "runtime", "must be a positive integer");

    v.check(!movie.genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(movie.genres.len() <= 5, "genres", "must not contain more than 5 genres");
    v.check(unique(&movie.genres), "genres", "must not contain duplicate values");
}
