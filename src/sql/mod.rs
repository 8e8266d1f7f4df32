//! SQL text for movie statements: identifiers are constants or allow-listed, values are parameters.

mod builder;
pub use builder::*;
