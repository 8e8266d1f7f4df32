//! Cinema API: JSON CRUD over a movie catalogue with validated filtering, sorting and pagination.

pub mod config;
pub mod error;
pub mod extractors;
pub mod filters;
pub mod handlers;
pub mod metadata;
pub mod migration;
pub mod movie;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod validator;

pub use config::Config;
pub use error::{AppError, ConfigError, StoreError};
pub use filters::{validate_filters, FilterDefaults, Filters, SortDirection, UnsafeSortParameter};
pub use metadata::{calculate_metadata, Metadata};
pub use migration::apply_migrations;
pub use movie::{Movie, MovieInput, MovieUpdate};
pub use response::{write_json, Envelope};
pub use routes::{app, common_routes, movie_routes};
pub use service::MovieService;
pub use state::AppState;
pub use store::{MemoryMovieStore, MovieStore, PgMovieStore};
pub use validator::Validator;
