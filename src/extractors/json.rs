//! Strict JSON request bodies.
//!
//! Bodies are capped at [`MAX_BODY_BYTES`], must hold exactly one JSON value, and are decoded
//! into a target type that is expected to `deny_unknown_fields`. Every decode failure is mapped
//! to a [`BodyError`] so handlers never see `serde_json` errors.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{FromRequest, Request},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

pub const MAX_BODY_BYTES: usize = 1_048_576;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BodyError {
    #[error("body contains badly-formed JSON (at character {offset})")]
    Malformed { offset: usize },
    #[error("body contains badly-formed JSON")]
    Truncated,
    #[error("{}", type_mismatch_message(.field, .offset))]
    TypeMismatch { field: Option<String>, offset: usize },
    #[error("body must not be empty")]
    Empty,
    #[error("body contains unknown key \"{0}\"")]
    UnknownField(String),
    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },
    #[error("body must only contain a single JSON value")]
    TrailingContent,
    #[error("body is invalid: {0}")]
    Invalid(String),
    #[error("body could not be read")]
    Unreadable,
}

fn type_mismatch_message(field: &Option<String>, offset: &usize) -> String {
    match field {
        Some(name) => format!("body contains incorrect JSON type for field \"{}\"", name),
        None => format!("body contains incorrect JSON type (at character {})", offset),
    }
}

/// Decode exactly one JSON value from `input` into `T`.
pub fn decode_json<T: DeserializeOwned>(input: &[u8]) -> Result<T, BodyError> {
    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(input);
    let value = T::deserialize(&mut de).map_err(|e| classify(input, &e))?;
    de.end().map_err(|_| BodyError::TrailingContent)?;
    Ok(value)
}

/// Read at most `limit` bytes from `body` and decode them.
pub async fn read_json<T: DeserializeOwned>(body: Body, limit: usize) -> Result<T, BodyError> {
    let bytes = Limited::new(body, limit)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                BodyError::TooLarge { limit }
            } else {
                tracing::debug!(error = %e, "request body read failed");
                BodyError::Unreadable
            }
        })?
        .to_bytes();
    decode_json(&bytes)
}

fn classify(input: &[u8], e: &serde_json::Error) -> BodyError {
    let offset = byte_offset(input, e.line(), e.column());
    match e.classify() {
        Category::Eof => BodyError::Truncated,
        Category::Syntax | Category::Io => BodyError::Malformed { offset },
        Category::Data => {
            let msg = e.to_string();
            if let Some(rest) = msg.strip_prefix("unknown field `") {
                let name = rest.split('`').next().unwrap_or_default();
                return BodyError::UnknownField(name.to_string());
            }
            if msg.starts_with("invalid type") || msg.starts_with("invalid value") || msg.starts_with("invalid length") {
                return BodyError::TypeMismatch {
                    field: field_at(input, offset),
                    offset,
                };
            }
            let without_position = msg.split(" at line ").next().unwrap_or_default();
            BodyError::Invalid(without_position.to_string())
        }
    }
}

/// serde_json reports 1-based line and column; convert to a byte offset into `input`.
fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = input
        .split(|&b| b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column).min(input.len())
}

/// Name of the top-level object key whose value contains byte `offset`.
fn field_at(input: &[u8], offset: usize) -> Option<String> {
    let end = offset.min(input.len());
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    let mut last_string: Option<(usize, usize)> = None;
    let mut field = None;

    for (i, &b) in input[..end].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
                last_string = Some((start, i));
            }
            continue;
        }
        match b {
            b'"' => {
                in_string = true;
                start = i + 1;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 1 => {
                field = last_string.map(|(s, e)| String::from_utf8_lossy(&input[s..e]).into_owned());
            }
            _ => {}
        }
    }
    field
}

/// Extractor for a strictly decoded, size-bounded JSON body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let value = read_json(req.into_body(), MAX_BODY_BYTES).await?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Input {
        title: String,
        #[serde(default)]
        year: i32,
        #[serde(default)]
        genres: Vec<String>,
    }

    #[test]
    fn test_decodes_single_object() {
        let input: Input = decode_json(br#"{"title":"X","year":2003}"#).unwrap();
        assert_eq!(input.title, "X");
        assert_eq!(input.year, 2003);
        assert!(input.genres.is_empty());
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        assert!(decode_json::<Input>(b"{\"title\":\"X\"}\n\n").is_ok());
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(decode_json::<Input>(b"").unwrap_err(), BodyError::Empty);
        assert_eq!(decode_json::<Input>(b"  \n").unwrap_err(), BodyError::Empty);
    }

    #[test]
    fn test_two_values_is_trailing_content() {
        let err = decode_json::<Input>(br#"{"title":"X"}{"title":"Y"}"#).unwrap_err();
        assert_eq!(err, BodyError::TrailingContent);
    }

    #[test]
    fn test_unknown_field_is_named() {
        let err = decode_json::<Input>(br#"{"title":"X","oops":true}"#).unwrap_err();
        assert_eq!(err, BodyError::UnknownField("oops".into()));
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn test_syntax_error_has_offset() {
        let err = decode_json::<Input>(br#"{"title": "X",,}"#).unwrap_err();
        match err {
            BodyError::Malformed { offset } => assert!(offset > 0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_truncated_body() {
        assert_eq!(decode_json::<Input>(br#"{"title": "#).unwrap_err(), BodyError::Truncated);
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let err = decode_json::<Input>(br#"{"title":"X","year":"2003"}"#).unwrap_err();
        assert!(matches!(&err, BodyError::TypeMismatch { field: Some(f), .. } if f == "year"));
        assert!(err.to_string().contains("\"year\""));

        let err = decode_json::<Input>(br#"{"title":"X","genres":["war", 1]}"#).unwrap_err();
        assert!(matches!(&err, BodyError::TypeMismatch { field: Some(f), .. } if f == "genres"));
    }

    #[test]
    fn test_type_mismatch_without_field_gives_offset() {
        let err = decode_json::<Input>(b"[1, 2]").unwrap_err();
        assert!(matches!(err, BodyError::TypeMismatch { field: None, .. }));
        assert!(err.to_string().contains("at character"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = decode_json::<Input>(br#"{"year":1}"#).unwrap_err();
        assert_eq!(err, BodyError::Invalid("missing field `title`".into()));
    }

    #[test]
    fn test_byte_offset_spans_lines() {
        let input = b"ab\ncd\nef";
        assert_eq!(byte_offset(input, 1, 2), 2);
        assert_eq!(byte_offset(input, 2, 1), 4);
        assert_eq!(byte_offset(input, 3, 2), 8);
    }

    #[tokio::test]
    async fn test_read_json_enforces_limit() {
        let body = Body::from(format!(r#"{{"title":"{}"}}"#, "a".repeat(64)));
        let err = read_json::<Input>(body, 16).await.unwrap_err();
        assert_eq!(err, BodyError::TooLarge { limit: 16 });
        assert_eq!(err.to_string(), "body must not be larger than 16 bytes");
    }

    #[tokio::test]
    async fn test_read_json_within_limit() {
        let body = Body::from(r#"{"title":"X"}"#);
        let input: Input = read_json(body, MAX_BODY_BYTES).await.unwrap();
        assert_eq!(input.title, "X");
    }
}
