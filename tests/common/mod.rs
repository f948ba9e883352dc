//! Shared utilities for integration tests: mock JSON-RPC nodes on
//! ephemeral ports.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How a mock node answers one JSON-RPC method.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// `{"result": ...}`
    Result(Value),
    /// `{"error": {"code": .., "message": ..}}`
    RpcError(i64, &'static str),
    /// Bare HTTP status with an empty body.
    Status(u16),
    /// Never answer.
    Hang,
    /// Arbitrary body with status 200.
    Raw(&'static str),
}

/// A running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a node whose reply depends on the called method.
pub async fn start_rpc_node<F>(reply: F) -> MockNode
where
    F: Fn(&str) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let reply = Arc::new(reply);

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let reply = reply.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        handle(socket, reply.as_ref(), &counter).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode { addr, hits }
}

/// Start a node that answers every method the same way.
pub async fn start_fixed_node(reply: MockReply) -> MockNode {
    start_rpc_node(move |_| reply.clone()).await
}

/// An address nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Substrate-shaped `system_account` result.
pub fn account(free: &str, reserved: &str, frozen: &str) -> Value {
    json!({
        "nonce": 0,
        "consumers": 0,
        "providers": 1,
        "sufficients": 0,
        "data": {"free": free, "reserved": reserved, "frozen": frozen, "flags": "0x80000000000000000000000000000000"}
    })
}

async fn handle<F>(mut socket: TcpStream, reply: &F, hits: &AtomicUsize)
where
    F: Fn(&str) -> MockReply,
{
    let Some(body) = read_request(&mut socket).await else {
        return;
    };
    hits.fetch_add(1, Ordering::SeqCst);

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let id = request.get("id").cloned().unwrap_or(json!(1));

    let (status, body) = match reply(&method) {
        MockReply::Result(result) => (200, json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string()),
        MockReply::RpcError(code, message) => (
            200,
            json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}}).to_string(),
        ),
        MockReply::Status(status) => (status, String::new()),
        MockReply::Raw(raw) => (200, raw.to_string()),
        MockReply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return;
        }
    };

    let status_text = match status {
        200 => "200 OK",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "500 Internal Server Error",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Read one HTTP request and return its body.
async fn read_request(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(buf[header_end..header_end + content_length].to_vec())
}
