//! Transport boundary: bounded listener and per-connection workers.
//!
//! # Design Decisions
//! - One tokio task per accepted connection; workers share nothing mutable,
//!   only the read-only route table.
//! - Accept errors are logged and the loop continues; a single bad
//!   connection never terminates the process.

pub mod connection;
pub mod listener;

use std::sync::Arc;

use crate::routing::router::Router;
pub use connection::ConnectionId;
pub use listener::{ConnectionPermit, Listener};

/// Accept loop: hand each connection to its own worker task. Runs until the
/// process exits.
pub async fn serve(listener: Listener, router: Arc<Router>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr, permit)) => {
                let router = Arc::clone(&router);
                tokio::spawn(async move {
                    connection::serve(stream, peer_addr, router).await;
                    drop(permit);
                });
            }
            Err(error) => {
                tracing::error!(error = %error, "Failed to accept connection");
            }
        }
    }
}
