//! `MovieStore` over a PostgreSQL pool.

use super::{MovieStore, StoreError};
use crate::filters::Filters;
use crate::movie::Movie;
use crate::sql::{count_movies, delete_movie, insert_movie, select_movie_by_id, select_movies, update_movie};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn insert(&self, movie: &mut Movie) -> Result<(), StoreError> {
        let sql = insert_movie();
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query(&sql)
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .fetch_one(&self.pool)
            .await?;
        movie.id = row.try_get("id")?;
        movie.created_at = row.try_get("created_at")?;
        movie.version = row.try_get("version")?;
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Movie, StoreError> {
        let sql = select_movie_by_id();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::RecordNotFound)?;
        Ok(movie_from_row(&row)?)
    }

    async fn get_all(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, i64), StoreError> {
        let sql = select_movies(filters)?;
        tracing::debug!(sql = %sql, title, genres = ?genres, "query");
        let rows = sqlx::query(&sql)
            .bind(title)
            .bind(genres)
            .bind(filters.limit())
            .bind(filters.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>(0)?,
            None if filters.offset() > 0 => {
                let sql = count_movies();
                tracing::debug!(sql = %sql, title, genres = ?genres, "query");
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(title)
                    .bind(genres)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => 0,
        };
        let movies = rows.iter().map(movie_from_row).collect::<Result<Vec<_>, _>>()?;
        Ok((movies, total))
    }

    async fn update(&self, movie: &mut Movie) -> Result<(), StoreError> {
        let sql = update_movie();
        tracing::debug!(sql = %sql, id = movie.id, version = movie.version, "query");
        let row = sqlx::query(&sql)
            .bind(&movie.title)
            .bind(movie.year)
            .bind(movie.runtime)
            .bind(&movie.genres)
            .bind(movie.id)
            .bind(movie.version)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::EditConflict)?;
        movie.version = row.try_get("version")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let sql = delete_movie();
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}

fn movie_from_row(row: &PgRow) -> Result<Movie, sqlx::Error> {
    Ok(Movie {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
        runtime: row.try_get("runtime")?,
        genres: row.try_get("genres")?,
        version: row.try_get("version")?,
    })
}
