//! Typed header values.
//!
//! # Design Decisions
//! - Header values are a tagged variant instead of a stringly map: the
//!   parser sniffs integers (so `Content-Length` is retrievable as a
//!   number) and keeps `Accept-Encoding` as an ordered list of tokens.
//! - Typed accessors fail with a dedicated error on a variant mismatch
//!   rather than panicking.
//! - Names are matched exactly as sent (`User-Agent`, not `user-agent`);
//!   full RFC casing rules are out of scope.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Accessor was called on the wrong [`HeaderValue`] variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("header value holds {actual}, expected {expected}")]
pub struct HeaderValueError {
    pub expected: &'static str,
    pub actual: &'static str,
}

/// A single header value: free text, a sniffed integer, or an ordered list
/// of comma-separated tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    Number(i64),
    List(Vec<String>),
}

impl HeaderValue {
    /// Trim the raw value and store it as a number if it parses cleanly as
    /// one, otherwise as text.
    pub fn sniff(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => HeaderValue::Number(n),
            Err(_) => HeaderValue::Text(trimmed.to_string()),
        }
    }

    /// Split the raw value on `,`, trimming each token. Order and duplicates
    /// are preserved. Used for `Accept-Encoding`.
    pub fn list(raw: &str) -> Self {
        HeaderValue::List(raw.split(',').map(|t| t.trim().to_string()).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HeaderValue::Text(_) => "text",
            HeaderValue::Number(_) => "number",
            HeaderValue::List(_) => "list",
        }
    }

    pub fn as_text(&self) -> Result<&str, HeaderValueError> {
        match self {
            HeaderValue::Text(s) => Ok(s),
            other => Err(HeaderValueError {
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_number(&self) -> Result<i64, HeaderValueError> {
        match self {
            HeaderValue::Number(n) => Ok(*n),
            other => Err(HeaderValueError {
                expected: "number",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_list(&self) -> Result<&[String], HeaderValueError> {
        match self {
            HeaderValue::List(items) => Ok(items),
            other => Err(HeaderValueError {
                expected: "list",
                actual: other.kind(),
            }),
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => f.write_str(s),
            HeaderValue::Number(n) => write!(f, "{n}"),
            HeaderValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Header name → typed value mapping for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HashMap<String, HeaderValue>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: HeaderValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
