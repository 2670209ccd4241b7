//! Response construction and serialization.
//!
//! # Responsibilities
//! - Hold a status code, the emittable headers and a body
//! - Serialize in the fixed field order: status line, `Content-Type`,
//!   `Content-Encoding`, `Content-Length`, blank line, body
//! - Derive reason phrases from the fixed table clients assert on
//!
//! # Design Decisions
//! - `Content-Length` is emitted only for a non-empty body.
//! - The reason table is deliberately tiny: 200→OK, 201→Created,
//!   404→Not Found, any other 2xx/3xx→OK, anything ≥400→Internal Server
//!   Error. Reproduced exactly for wire compatibility.

/// An HTTP/1.1 response ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Response {
            status,
            content_type: None,
            content_encoding: None,
            body: Vec::new(),
        }
    }

    /// A `text/plain` response.
    pub fn text(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Response {
            status,
            content_type: Some("text/plain".to_string()),
            content_encoding: None,
            body: body.into(),
        }
    }

    /// An `application/octet-stream` response.
    pub fn octet_stream(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Response {
            status,
            content_type: Some("application/octet-stream".to_string()),
            content_encoding: None,
            body: body.into(),
        }
    }

    pub fn with_content_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.content_encoding = Some(encoding.into());
        self
    }

    /// Reason phrase for a status code.
    pub fn reason(status: u16) -> &'static str {
        match status {
            200 => "OK",
            201 => "Created",
            404 => "Not Found",
            200..=399 => "OK",
            _ => "Internal Server Error",
        }
    }

    /// Serialize into wire bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 128);
        out.extend_from_slice(
            format!("HTTP/1.1 {} {}\r\n", self.status, Self::reason(self.status)).as_bytes(),
        );
        if let Some(content_type) = self.content_type.as_deref().filter(|v| !v.is_empty()) {
            out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        if let Some(encoding) = self.content_encoding.as_deref().filter(|v| !v.is_empty()) {
            out.extend_from_slice(format!("Content-Encoding: {encoding}\r\n").as_bytes());
        }
        if !self.body.is_empty() {
            out.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_table_is_exact() {
        assert_eq!(Response::reason(200), "OK");
        assert_eq!(Response::reason(201), "Created");
        assert_eq!(Response::reason(404), "Not Found");
        assert_eq!(Response::reason(204), "OK");
        assert_eq!(Response::reason(301), "OK");
        assert_eq!(Response::reason(400), "Internal Server Error");
        assert_eq!(Response::reason(500), "Internal Server Error");
        assert_eq!(Response::reason(503), "Internal Server Error");
    }

    #[test]
    fn serializes_in_fixed_header_order() {
        let raw = Response::text(200, "abc")
            .with_content_encoding("gzip")
            .serialize();
        assert_eq!(
            raw,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Encoding: gzip\r\nContent-Length: 3\r\n\r\nabc"
        );
    }

    #[test]
    fn empty_body_has_no_content_length() {
        let raw = Response::text(404, "").serialize();
        assert_eq!(
            raw,
            b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n\r\n"
        );
    }

    #[test]
    fn bare_response_is_just_a_status_line() {
        let raw = Response::new(404).serialize();
        assert_eq!(raw, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn empty_content_type_is_not_emitted() {
        let mut response = Response::new(200);
        response.content_type = Some(String::new());
        assert_eq!(response.serialize(), b"HTTP/1.1 200 OK\r\n\r\n");
    }
}
