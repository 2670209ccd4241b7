//! End-to-end tests driving the real server over TCP with raw request bytes.

use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use flate2::read::GzDecoder;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use http_server::config::ListenerConfig;
use http_server::files::FileStore;
use http_server::handlers;
use http_server::net::{self, Listener};

/// Unique scratch directory for one test's file store.
fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("http-server-e2e-{tag}-{}", std::process::id()))
}

/// Start a full server on an ephemeral port and return its address.
async fn start_server(tag: &str) -> SocketAddr {
    let store = Arc::new(FileStore::new(scratch_dir(tag)));
    store.ensure_root().await.unwrap();
    let router = Arc::new(handlers::build_router(store));

    let config = ListenerConfig {
        bind_address: "127.0.0.1:0".to_string(),
        max_connections: 16,
    };
    let listener = Listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        net::serve(listener, router).await;
    });

    addr
}

/// Send raw request bytes, read the whole response.
async fn send(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

/// Split a raw response into its header block (as text) and body bytes.
fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let at = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    (
        String::from_utf8(raw[..at].to_vec()).unwrap(),
        raw[at + 4..].to_vec(),
    )
}

#[tokio::test]
async fn root_returns_200_ok() {
    let addr = start_server("root").await;
    let raw = send(addr, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"), "head: {head}");
    assert!(head.contains("Content-Type: text/plain"));
    assert_eq!(body, b"test");
}

#[tokio::test]
async fn echo_returns_the_wildcard_value() {
    let addr = start_server("echo").await;
    let raw = send(addr, b"GET /echo/abc HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Length: 3"));
    assert_eq!(body, b"abc");
}

#[tokio::test]
async fn echo_gzip_round_trips() {
    let addr = start_server("gzip").await;
    let raw = send(
        addr,
        b"GET /echo/abc HTTP/1.1\r\nHost: x\r\nAccept-Encoding: gzip\r\n\r\n",
    )
    .await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Encoding: gzip"), "head: {head}");

    let mut decoder = GzDecoder::new(&body[..]);
    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).unwrap();
    assert_eq!(decoded, "abc");
}

#[tokio::test]
async fn echo_without_gzip_in_the_list_stays_plain() {
    let addr = start_server("nogzip").await;
    let raw = send(
        addr,
        b"GET /echo/abc HTTP/1.1\r\nHost: x\r\nAccept-Encoding: deflate, br\r\n\r\n",
    )
    .await;

    let (head, body) = split_response(&raw);
    assert!(!head.contains("Content-Encoding"));
    assert_eq!(body, b"abc");
}

#[tokio::test]
async fn user_agent_is_echoed() {
    let addr = start_server("ua").await;
    let raw = send(
        addr,
        b"GET /user-agent HTTP/1.1\r\nHost: x\r\nUser-Agent: foobar/1.2.3\r\n\r\n",
    )
    .await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"foobar/1.2.3");
}

#[tokio::test]
async fn unknown_path_is_404_with_empty_body() {
    let addr = start_server("404").await;
    let raw = send(addr, b"GET /nope HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"), "head: {head}");
    assert!(body.is_empty());
    assert!(!head.contains("Content-Length"));
}

#[tokio::test]
async fn unknown_method_on_a_known_path_is_404() {
    let addr = start_server("method-404").await;
    let raw = send(addr, b"POST / HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let (head, _) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn files_post_then_get_round_trips() {
    let addr = start_server("files").await;

    let raw = send(
        addr,
        b"POST /files/test.txt HTTP/1.1\r\nHost: x\r\nContent-Length: 4\r\n\r\nabcd",
    )
    .await;
    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 201 Created\r\n"), "head: {head}");
    assert!(body.is_empty());

    let raw = send(addr, b"GET /files/test.txt HTTP/1.1\r\nHost: x\r\n\r\n").await;
    let (head, body) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("Content-Type: application/octet-stream"));
    assert_eq!(body, b"abcd");
}

#[tokio::test]
async fn missing_file_is_404() {
    let addr = start_server("files-missing").await;
    let raw = send(addr, b"GET /files/absent.bin HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let (head, _) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn malformed_request_gets_a_400_response() {
    let addr = start_server("malformed").await;
    let raw = send(addr, b"GARBAGE\r\n\r\n").await;

    // The reason table maps every unlisted >=400 code to this phrase.
    let (head, _) = split_response(&raw);
    assert!(
        head.starts_with("HTTP/1.1 400 Internal Server Error\r\n"),
        "head: {head}"
    );
}

#[tokio::test]
async fn unsupported_method_gets_a_400_response() {
    let addr = start_server("put").await;
    let raw = send(addr, b"PUT /echo/abc HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let (head, _) = split_response(&raw);
    assert!(head.starts_with("HTTP/1.1 400 Internal Server Error\r\n"));
}

#[tokio::test]
async fn fixed_body_routes_are_served() {
    let addr = start_server("extras").await;

    let (head, body) = split_response(&send(addr, b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n").await);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"Hello World!");

    let (_, body) = split_response(&send(addr, b"GET /test/me HTTP/1.1\r\nHost: x\r\n\r\n").await);
    assert_eq!(body, b"test");

    let (_, body) = split_response(&send(addr, b"GET /echo HTTP/1.1\r\nHost: x\r\n\r\n").await);
    assert_eq!(body, b"test");
}

#[tokio::test]
async fn concurrent_connections_are_isolated() {
    let addr = start_server("concurrent").await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        tasks.push(tokio::spawn(async move {
            let request = format!("GET /echo/task{i} HTTP/1.1\r\nHost: x\r\n\r\n");
            send(addr, request.as_bytes()).await
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let raw = task.await.unwrap();
        let (head, body) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(body, format!("task{i}").into_bytes());
    }
}
