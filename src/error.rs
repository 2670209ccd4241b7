//! Crate-wide error types.
//!
//! # Design Decisions
//! - Parse failures are recoverable per connection: the worker answers with
//!   a 400-class response and closes, it never tears down the process.
//! - An unrecognized method token is a distinct error, not a silent
//!   fallback to GET.
//! - Oversized requests (a read that fills the whole buffer) are rejected
//!   explicitly instead of being truncated and parsed anyway.

use thiserror::Error;

/// Errors produced while turning raw connection bytes into a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The request line or header block does not have the expected shape.
    #[error("malformed request: {0}")]
    Malformed(&'static str),

    /// The method token is not one of the supported verbs.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The request did not fit into the fixed read buffer.
    #[error("request exceeds the {limit}-byte read buffer")]
    RequestTooLarge { limit: usize },
}

/// Errors at the transport boundary (bind/accept/IO).
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// Failed to accept a connection.
    #[error("failed to accept connection: {0}")]
    Accept(#[from] std::io::Error),
}
