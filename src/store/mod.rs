//! Movie persistence: the store trait the handlers depend on, and its implementations.

mod memory;
mod postgres;

pub use crate::error::StoreError;
pub use memory::MemoryMovieStore;
pub use postgres::PgMovieStore;

use crate::filters::Filters;
use crate::movie::Movie;
use async_trait::async_trait;

#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a new movie, filling in `id`, `created_at` and `version`.
    async fn insert(&self, movie: &mut Movie) -> Result<(), StoreError>;

    async fn get(&self, id: i64) -> Result<Movie, StoreError>;

    /// One page of movies matching `title` and containing every genre in `genres`,
    /// plus the total number of matches across all pages.
    /// `filters` must have passed `validate_filters`.
    async fn get_all(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, i64), StoreError>;

    /// Save changes if `movie.version` is still current, then bump `movie.version`.
    async fn update(&self, movie: &mut Movie) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
