//! Request extractors: strict JSON bodies, the record id path segment and query-string helpers.

pub mod json;
pub mod query;
pub use json::{JsonBody, MAX_BODY_BYTES};
pub use query::IdParam;
