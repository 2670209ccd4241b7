//! Per-connection worker.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Read one request into a fixed-capacity buffer
//! - Parse, dispatch, write the response, close
//! - Isolate every failure to the owning connection
//!
//! # Design Decisions
//! - One request per connection; no keep-alive, no pipelining.
//! - The read buffer never grows. A read that fills it completely is
//!   rejected as [`ParseError::RequestTooLarge`] instead of parsing a
//!   truncated request.
//! - Parse failures still get a syntactically valid HTTP response (400
//!   class), never a bare connection drop.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::ParseError;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::router::Router;

/// Fixed capacity of the per-request read buffer.
pub const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Serve one connection to completion. Errors are logged and swallowed
/// here: a failed connection never takes down the accept loop or any other
/// worker.
pub async fn serve(stream: TcpStream, peer_addr: SocketAddr, router: Arc<Router>) {
    let id = ConnectionId::new();
    if let Err(error) = handle(stream, peer_addr, router, id).await {
        tracing::warn!(
            connection_id = %id,
            peer_addr = %peer_addr,
            error = %error,
            "Connection failed"
        );
    }
}

async fn handle(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    router: Arc<Router>,
    id: ConnectionId,
) -> std::io::Result<()> {
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let n = stream.read(&mut buffer).await?;
    if n == 0 {
        tracing::trace!(connection_id = %id, "Client closed without sending data");
        return Ok(());
    }

    let response = match read_request(&buffer[..n]) {
        Ok(request) => {
            let method = request.method();
            let path = request.path().to_string();
            let response = router.dispatch(request).await;
            tracing::info!(
                connection_id = %id,
                peer_addr = %peer_addr,
                method = %method,
                path = %path,
                status = response.status,
                "Request handled"
            );
            response
        }
        Err(error) => {
            tracing::warn!(
                connection_id = %id,
                peer_addr = %peer_addr,
                error = %error,
                "Rejecting unparseable request"
            );
            reject(&error)
        }
    };

    stream.write_all(&response.serialize()).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Parse the bytes read from the socket, treating a completely filled
/// buffer as an oversized (truncated) request.
fn read_request(bytes: &[u8]) -> Result<Request, ParseError> {
    if bytes.len() == READ_BUFFER_SIZE {
        return Err(ParseError::RequestTooLarge {
            limit: READ_BUFFER_SIZE,
        });
    }
    Request::parse(bytes)
}

/// Map a parse failure to its 400-class response.
fn reject(error: &ParseError) -> Response {
    let status = match error {
        ParseError::RequestTooLarge { .. } => 413,
        ParseError::Malformed(_) | ParseError::UnsupportedMethod(_) => 400,
    };
    Response::text(status, error.to_string())
}
