//! Apply the movies schema to the database. Every statement is idempotent.

use crate::error::AppError;
use crate::sql::{quoted, MOVIES_TABLE};
use sqlx::PgPool;

/// CREATE TABLE and indexes for movies if they do not exist yet.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let table = quoted(MOVIES_TABLE);
    let statements = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                title TEXT NOT NULL,
                year INTEGER NOT NULL,
                runtime INTEGER NOT NULL,
                genres TEXT[] NOT NULL,
                version INTEGER NOT NULL DEFAULT 1
            )
            "#,
            table
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS movies_title_idx ON {} USING GIN (to_tsvector('simple', title))",
            table
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS movies_genres_idx ON {} USING GIN (genres)",
            table
        ),
    ];

    for sql in &statements {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::info!(table = MOVIES_TABLE, "migrations applied");
    Ok(())
}
