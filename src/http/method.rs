//! HTTP method registry.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// The closed set of supported HTTP verbs.
///
/// `All` is a pseudo-method used only as a route-registration key meaning
/// "match any method at this path" (the `/404` fallback is registered under
/// it). It is never produced by parsing an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    All,
}

impl FromStr for Method {
    type Err = ParseError;

    /// Accepts exactly the literal tokens `GET` and `POST`. Any other token,
    /// including `ALL`, fails with [`ParseError::UnsupportedMethod`].
    fn from_str(token: &str) -> Result<Self, ParseError> {
        match token {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(ParseError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::All => f.write_str("ALL"),
        }
    }
}
