//! MovieService: validation and persistence for the movie resource.

mod movies;
pub use movies::{MovieService, LIST_DEFAULTS};
