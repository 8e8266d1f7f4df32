//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the movies table.

use crate::filters::{Filters, UnsafeSortParameter};

pub const MOVIES_TABLE: &str = "movies";

const MOVIE_COLUMNS: &str = "id, created_at, title, year, runtime, genres, version";

/// Title ($1) and genres ($2) filter shared by the list and count statements.
const MOVIE_FILTER: &str = "(to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
                            AND (genres @> $2 OR $2 = '{}')";

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// INSERT; params: title, year, runtime, genres. Returns the generated id, created_at, version.
pub fn insert_movie() -> String {
    format!(
        "INSERT INTO {} (title, year, runtime, genres) VALUES ($1, $2, $3, $4) RETURNING id, created_at, version",
        quoted(MOVIES_TABLE)
    )
}

/// SELECT by id; sole param is the id.
pub fn select_movie_by_id() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", MOVIE_COLUMNS, quoted(MOVIES_TABLE))
}

/// Filtered, sorted page of movies with the total match count in the first column.
/// Params: title (full-text, empty matches all), genres (must contain all, empty matches all), limit, offset.
/// Ties on the sort column fall back to ascending id so paging is stable.
pub fn select_movies(filters: &Filters) -> Result<String, UnsafeSortParameter> {
    let column = filters.sort_column()?;
    Ok(format!(
        "SELECT count(*) OVER(), {} FROM {} WHERE {} ORDER BY {} {}, id ASC LIMIT $3 OFFSET $4",
        MOVIE_COLUMNS,
        quoted(MOVIES_TABLE),
        MOVIE_FILTER,
        quoted(column),
        filters.sort_direction().as_sql()
    ))
}

/// Number of movies matching the list filter; params: title, genres.
/// Used when a page lies past the last match and the windowed count has no row to ride on.
pub fn count_movies() -> String {
    format!("SELECT count(*) FROM {} WHERE {}", quoted(MOVIES_TABLE), MOVIE_FILTER)
}

/// UPDATE guarded by version; params: title, year, runtime, genres, id, version. Returns the new version.
pub fn update_movie() -> String {
    format!(
        "UPDATE {} SET title = $1, year = $2, runtime = $3, genres = $4, version = version + 1 \
         WHERE id = $5 AND version = $6 RETURNING version",
        quoted(MOVIES_TABLE)
    )
}

/// DELETE by id.
pub fn delete_movie() -> String {
    format!("DELETE FROM {} WHERE id = $1", quoted(MOVIES_TABLE))
}
