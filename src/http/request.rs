//! Request parsing.
//!
//! # Responsibilities
//! - Split a raw byte buffer into request line, header block and body
//! - Enforce the three-token request line shape
//! - Type header values (`Accept-Encoding` as a list, integers sniffed)
//! - Extract exactly `Content-Length` body bytes, never more
//!
//! # Design Decisions
//! - The header/body boundary is the first `\r\n\r\n`. A buffer without one
//!   is treated as a header-only request with an empty body, which tolerates
//!   line-buffered partial reads up to the fixed read-buffer size.
//! - A header value may contain `:`; only the first one delimits the name.

use crate::error::ParseError;
use crate::http::headers::{HeaderValue, Headers};
use crate::http::method::Method;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// A parsed request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    headers: Headers,
    body: Vec<u8>,
}

impl Request {
    /// Parse one request out of a raw connection buffer.
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, tail) = match find_terminator(buffer) {
            Some(at) => (&buffer[..at], &buffer[at + HEADER_TERMINATOR.len()..]),
            None => (buffer, &buffer[buffer.len()..]),
        };

        let head = std::str::from_utf8(head)
            .map_err(|_| ParseError::Malformed("header block is not valid UTF-8"))?;

        let mut lines = head.split("\r\n");
        let request_line = lines.next().ok_or(ParseError::Malformed("empty request"))?;
        let (method, path) = parse_request_line(request_line)?;

        let mut headers = Headers::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or(ParseError::Malformed("header line has no `:` delimiter"))?;
            let value = match name {
                "Accept-Encoding" => HeaderValue::list(value),
                _ => HeaderValue::sniff(value),
            };
            headers.insert(name, value);
        }

        let body = extract_body(&headers, tail)?;

        Ok(Request {
            method,
            path,
            headers,
            body,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decompose into (method, path, headers, body).
    pub fn into_parts(self) -> (Method, String, Headers, Vec<u8>) {
        (self.method, self.path, self.headers, self.body)
    }
}

/// The request line must split into exactly three whitespace-separated
/// tokens: method, path, version. Anything else is malformed.
fn parse_request_line(line: &str) -> Result<(Method, String), ParseError> {
    let mut tokens = line.split_whitespace();
    let method = tokens
        .next()
        .ok_or(ParseError::Malformed("request line is empty"))?;
    let path = tokens
        .next()
        .ok_or(ParseError::Malformed("request line has no path"))?;
    let _version = tokens
        .next()
        .ok_or(ParseError::Malformed("request line has no version"))?;
    if tokens.next().is_some() {
        return Err(ParseError::Malformed(
            "request line has more than three tokens",
        ));
    }
    if !path.starts_with('/') {
        return Err(ParseError::Malformed("path does not start with `/`"));
    }

    Ok((method.parse()?, path.to_string()))
}

/// Take exactly `Content-Length` bytes when the header is present and holds
/// a positive integer; otherwise the body is empty, even if trailing bytes
/// remain in the buffer.
fn extract_body(headers: &Headers, tail: &[u8]) -> Result<Vec<u8>, ParseError> {
    let declared = headers
        .get("Content-Length")
        .and_then(|v| v.as_number().ok())
        .filter(|len| *len > 0);

    match declared {
        Some(len) => {
            let len = len as usize;
            if tail.len() < len {
                return Err(ParseError::Malformed(
                    "body is shorter than the declared Content-Length",
                ));
            }
            Ok(tail[..len].to_vec())
        }
        None => Ok(Vec::new()),
    }
}

fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
}
