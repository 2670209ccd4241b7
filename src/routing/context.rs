//! Per-request context handed to handlers.

use crate::http::headers::{HeaderValue, Headers};
use crate::http::request::Request;

/// Ephemeral value passed to the invoked handler: the requested route, the
/// matched segment (the wildcard's actual text when one was traversed),
/// the inbound headers and the inbound body.
///
/// Created by the dispatcher immediately before invoking the handler and
/// discarded when the handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    route: String,
    matched: String,
    headers: Headers,
    body: Vec<u8>,
}

impl RouteContext {
    /// Build a context from a parsed request. `Content-Type: text/plain` is
    /// merged in only when the request did not carry one.
    pub(crate) fn new(request: Request, matched: String) -> Self {
        let (_, route, mut headers, body) = request.into_parts();
        if !headers.contains("Content-Type") {
            headers.insert("Content-Type", HeaderValue::Text("text/plain".to_string()));
        }

        RouteContext {
            route,
            matched,
            headers,
            body,
        }
    }

    /// The path the client requested.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The final matched segment; for wildcard routes like `/echo/:value`
    /// this is the substituted text.
    pub fn matched(&self) -> &str {
        &self.matched
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_content_type_only_when_absent() {
        let request = Request::parse(b"GET /x HTTP/1.1\r\n\r\n").unwrap();
        let ctx = RouteContext::new(request, "x".to_string());
        assert_eq!(
            ctx.headers().get("Content-Type"),
            Some(&HeaderValue::Text("text/plain".to_string()))
        );

        let request =
            Request::parse(b"GET /x HTTP/1.1\r\nContent-Type: application/json\r\n\r\n").unwrap();
        let ctx = RouteContext::new(request, "x".to_string());
        assert_eq!(
            ctx.headers().get("Content-Type"),
            Some(&HeaderValue::Text("application/json".to_string()))
        );
    }
}
