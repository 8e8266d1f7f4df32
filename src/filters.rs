//! Page, page size and sort parameters for list queries.
//!
//! A `Filters` value is parsed from the query string, checked once with [`validate_filters`],
//! and only then handed to the store. The sort column that reaches SQL always comes from the
//! allow-list carried by the value itself, never from the raw query string.

use crate::extractors::query::{read_int, read_string};
use crate::validator::{permitted_value, Validator};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A sort value outside the allow-list reached column resolution.
/// Means `validate_filters` was skipped; fatal to the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsafe sort parameter: {0}")]
pub struct UnsafeSortParameter(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Values used when a parameter is absent (or malformed, see [`Filters::parse`]).
#[derive(Debug, Clone, Copy)]
pub struct FilterDefaults<'a> {
    pub page: i64,
    pub page_size: i64,
    pub sort: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safe_list: Vec<String>,
}

impl Filters {
    /// Read `page`, `page_size` and `sort` from the query string.
    ///
    /// A non-integer `page` or `page_size` records an error on that field and the default is
    /// used in its place. `sort` is taken verbatim; it is checked later by `validate_filters`.
    pub fn parse(
        qs: &HashMap<String, String>,
        defaults: FilterDefaults<'_>,
        sort_safe_list: &[&str],
        v: &mut Validator,
    ) -> Self {
        Filters {
            page: read_int(qs, "page", defaults.page, v),
            page_size: read_int(qs, "page_size", defaults.page_size, v),
            sort: read_string(qs, "sort", defaults.sort),
            sort_safe_list: sort_safe_list.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Bare column name for the requested sort (leading `-` removed).
    pub fn sort_column(&self) -> Result<&str, UnsafeSortParameter> {
        if self.sort_safe_list.iter().any(|safe| *safe == self.sort) {
            return Ok(self.sort.strip_prefix('-').unwrap_or(&self.sort));
        }
        Err(UnsafeSortParameter(self.sort.clone()))
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Check bounds and the sort allow-list. Every violation is recorded.
pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page > 0, "page", "must be greater than zero");
    v.check(f.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(f.page_size > 0, "page_size", "must be greater than zero");
    v.check(f.page_size <= MAX_PAGE_SIZE, "page_size", "must be a maximum of 100");

    v.check(
        permitted_value(&f.sort, &f.sort_safe_list),
        "sort",
        "invalid sort value",
    );
}
