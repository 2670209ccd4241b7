//! Request routing: the path tree and the dispatcher.
//!
//! # Responsibilities
//! - Hold the registered path/method → handler table
//! - Resolve each parsed request to a handler (literal > wildcard > `/404`)
//! - Build the per-request [`RouteContext`] and invoke the handler

pub mod context;
pub mod router;

pub use context::RouteContext;
pub use router::{Handler, Router, NOT_FOUND_ROUTE, WILDCARD};
