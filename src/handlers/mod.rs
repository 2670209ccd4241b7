//! The built-in route set.
//!
//! # Routes
//! - `GET /`, `GET /echo`, `GET /test/me`: fixed `test` bodies
//! - `GET /hello`: fixed greeting
//! - `GET /echo/:value`: echoes the wildcard segment, gzip on request
//! - `GET /user-agent`: echoes the `User-Agent` header
//! - `GET|POST /files/:value`: file store access
//! - everything else: the router's `/404` fallback

use std::io::Write;
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::files::FileStore;
use crate::http::method::Method;
use crate::http::response::Response;
use crate::routing::context::RouteContext;
use crate::routing::router::Router;

/// Build the route table over the given file store.
pub fn build_router(store: Arc<FileStore>) -> Router {
    let mut router = Router::new();

    router.register(Method::Get, "/", |_ctx| async { Response::text(200, "test") });
    router.register(Method::Get, "/echo", |_ctx| async {
        Response::text(200, "test")
    });
    router.register(Method::Get, "/test/me", |_ctx| async {
        Response::text(200, "test")
    });
    router.register(Method::Get, "/hello", |_ctx| async {
        Response::text(200, "Hello World!")
    });

    router.register(Method::Get, "/echo/:value", |ctx| async move { echo(ctx) });
    router.register(Method::Get, "/user-agent", |ctx| async move {
        user_agent(ctx)
    });

    let files = Arc::clone(&store);
    router.register(Method::Get, "/files/:value", move |ctx| {
        let files = Arc::clone(&files);
        async move { read_file(ctx, &files).await }
    });

    let files = store;
    router.register(Method::Post, "/files/:value", move |ctx| {
        let files = Arc::clone(&files);
        async move { write_file(ctx, &files).await }
    });

    router
}

/// Echo the matched segment; gzip-encode it iff the client listed `gzip`
/// in `Accept-Encoding`.
fn echo(ctx: RouteContext) -> Response {
    let value = ctx.matched();

    let wants_gzip = ctx
        .headers()
        .get("Accept-Encoding")
        .and_then(|v| v.as_list().ok())
        .is_some_and(|encodings| encodings.iter().any(|e| e == "gzip"));

    if !wants_gzip {
        return Response::text(200, value);
    }

    match gzip(value.as_bytes()) {
        Ok(compressed) => Response::text(200, compressed).with_content_encoding("gzip"),
        Err(error) => {
            tracing::error!(error = %error, "Failed to gzip echo body");
            Response::text(500, "")
        }
    }
}

/// Body is the inbound `User-Agent` value, rendered whatever variant the
/// sniffer stored it as; empty when the header is missing.
fn user_agent(ctx: RouteContext) -> Response {
    let agent = ctx
        .headers()
        .get("User-Agent")
        .map(|v| v.to_string())
        .unwrap_or_default();
    Response::text(200, agent)
}

async fn read_file(ctx: RouteContext, files: &FileStore) -> Response {
    match files.read(ctx.matched()).await {
        Ok(contents) => Response::octet_stream(200, contents),
        Err(error) => {
            tracing::debug!(name = ctx.matched(), error = %error, "File read failed");
            Response::text(404, "")
        }
    }
}

async fn write_file(ctx: RouteContext, files: &FileStore) -> Response {
    match files.write(ctx.matched(), ctx.body()).await {
        Ok(()) => Response::octet_stream(201, Vec::new()),
        Err(error) => {
            tracing::warn!(name = ctx.matched(), error = %error, "File write failed");
            Response::text(500, "")
        }
    }
}

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
