//! Minimal HTTP/1.1 server with a wildcard-capable route table.
//!
//! # Architecture Overview
//!
//! ```text
//! connection bytes
//!     → http::Request::parse        (request line, typed headers, body)
//!     → routing::Router::dispatch   (tree descent, literal > wildcard > /404)
//!     → handler(RouteContext)       (async, returns a Response)
//!     → http::Response::serialize   (status line, fixed header order, body)
//!     → bytes back to connection
//! ```
//!
//! Each accepted connection is served by its own tokio task
//! ([`net::connection::serve`]); the route table is built once before the
//! accept loop starts and shared read-only across all workers. One request is
//! handled per connection, then the connection is closed. Persistent
//! connections, chunked transfer and TLS are out of scope.
//!
//! # Subsystems
//!
//! - [`http`]: request parsing, header typing, response serialization
//! - [`routing`]: route table, dispatcher, per-request context
//! - [`net`]: bounded listener and per-connection workers
//! - [`files`]: filesystem collaborator behind the `/files` routes
//! - [`handlers`]: the built-in route set
//! - [`config`]: configuration schema and TOML loading

pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod http;
pub mod net;
pub mod routing;

pub use config::ServerConfig;
pub use http::{Request, Response};
pub use routing::Router;
