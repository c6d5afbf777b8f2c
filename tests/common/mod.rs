//! Shared utilities for integration testing.

use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

/// Write a route list document into `dir` and return its path.
#[allow(dead_code)]
pub fn write_route_file(dir: &TempDir, keys: &[&str]) -> PathBuf {
    let path = dir.path().join("route-list.json");
    let body = serde_json::json!({ "route-keys": keys });
    std::fs::write(&path, body.to_string()).unwrap();
    path
}

/// Reserve an ephemeral port on localhost and release it for the caller.
#[allow(dead_code)]
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Poll `addr` until a TCP connection succeeds.
#[allow(dead_code)]
pub async fn wait_until_listening(addr: SocketAddr) {
    for _ in 0..100 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server did not start listening on {addr}");
}

/// HTTP client without connection pooling, so shutdown is not held up by idle sockets.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
