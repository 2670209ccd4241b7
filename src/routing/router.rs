//! Route table and dispatcher.
//!
//! # Responsibilities
//! - Decompose path patterns into segments at registration time
//! - Own the segment tree (literal children + one wildcard slot per node)
//! - Resolve request paths with greedy left-to-right descent
//! - Fall back to the `/404` handler on any miss
//!
//! # Design Decisions
//! - The tree is an owned structure built once before traffic starts;
//!   workers share it read-only, so no synchronization is needed.
//! - The wildcard child lives in its own slot, structurally distinct from a
//!   literal child that happens to be spelled `:value`.
//! - Literal match always wins over wildcard at the same depth, and there is
//!   no backtracking: a literal chosen at depth N is never revisited when
//!   depth N+1 misses.
//! - Registering the same `(method, path)` twice silently overwrites the
//!   earlier handler; last registration wins, deterministically.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::context::RouteContext;

/// Pattern segment that matches any single path segment.
pub const WILDCARD: &str = ":value";

/// Path of the fallback route every resolution miss lands on.
pub const NOT_FOUND_ROUTE: &str = "/404";

/// A registered request handler: an async function from context to response.
pub type Handler = Arc<dyn Fn(RouteContext) -> BoxFuture<'static, Response> + Send + Sync>;

/// One path segment in the route tree.
#[derive(Default)]
struct RouteNode {
    handlers: HashMap<Method, Handler>,
    children: HashMap<String, RouteNode>,
    wildcard: Option<Box<RouteNode>>,
}

impl RouteNode {
    /// A node is routable when anything can still be reached through it.
    /// Nodes with no handlers and no children are never constructed, so this
    /// only rejects a wildcard slot that was somehow left empty.
    fn is_routable(&self) -> bool {
        !self.handlers.is_empty() || !self.children.is_empty() || self.wildcard.is_some()
    }
}

/// The route table. Built once via [`Router::register`], then shared
/// read-only (typically behind an `Arc`) with every connection worker.
pub struct Router {
    root: RouteNode,
}

impl Router {
    /// Create a table with the `/404` fallback pre-registered under the
    /// `All` pseudo-method. Callers may override it by registering `/404`
    /// again before traffic starts.
    pub fn new() -> Self {
        let mut router = Router {
            root: RouteNode::default(),
        };
        router.register(Method::All, NOT_FOUND_ROUTE, |_ctx| async {
            Response::text(404, "")
        });
        router
    }

    /// Register `handler` for `method` at `pattern`. A segment spelled
    /// exactly `:value` is a wildcard placeholder. Intermediate nodes are
    /// created on demand; the last registration for a `(method, pattern)`
    /// pair wins.
    pub fn register<F, Fut>(&mut self, method: Method, pattern: &str, handler: F)
    where
        F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |ctx| handler(ctx).boxed());

        let mut node = &mut self.root;
        for segment in split_segments(pattern) {
            node = if segment == WILDCARD {
                node.wildcard.get_or_insert_with(Default::default)
            } else {
                node.children.entry(segment.to_string()).or_default()
            };
        }
        node.handlers.insert(method, handler);
    }

    /// Resolve a parsed request to its handler and invoke it.
    pub async fn dispatch(&self, request: Request) -> Response {
        let (handler, matched) = self.resolve(request.method(), request.path());
        let ctx = RouteContext::new(request, matched);
        handler(ctx).await
    }

    /// Greedy left-to-right descent. Returns the selected handler and the
    /// matched segment (the text a wildcard consumed when one was taken,
    /// otherwise the final segment).
    fn resolve(&self, method: Method, path: &str) -> (Handler, String) {
        let mut node = &self.root;
        let mut matched = "/".to_string();
        let mut wildcard_value: Option<&str> = None;

        for segment in split_segments(path) {
            let next = match node.children.get(segment) {
                Some(child) => Some(child),
                None => {
                    let fallback = node.wildcard.as_deref().filter(|w| w.is_routable());
                    if fallback.is_some() {
                        wildcard_value = Some(segment);
                    }
                    fallback
                }
            };

            match next {
                Some(child) => {
                    node = child;
                    matched = segment.to_string();
                }
                None => return (self.not_found_handler(), "404".to_string()),
            }
        }

        if let Some(value) = wildcard_value {
            matched = value.to_string();
        }

        let handler = node
            .handlers
            .get(&method)
            .or_else(|| node.handlers.get(&Method::All));
        match handler {
            Some(handler) => (handler.clone(), matched),
            None => (self.not_found_handler(), "404".to_string()),
        }
    }

    fn not_found_handler(&self) -> Handler {
        self.root
            .children
            .get("404")
            .and_then(|node| node.handlers.get(&Method::All))
            .cloned()
            .expect("the /404 fallback is registered at construction")
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompose a path into its segments. The root path `/` has none; empty
/// segments (doubled or trailing slashes) are dropped.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
