//! End-to-end tests of the service lifecycle.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use randomise_route_keys::config::ServerConfig;
use randomise_route_keys::http::ServerError;
use randomise_route_keys::lifecycle::{self, LifecycleError, Shutdown};
use serde_json::Value;

mod common;

fn config_for(route_file: std::path::PathBuf, port: u16) -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port,
        route_file,
        shutdown_grace: Duration::from_secs(2),
        shutdown_quiescence: Duration::from_millis(10),
        metrics_address: None,
    }
}

#[tokio::test]
async fn test_serve_and_stop() {
    let dir = tempfile::tempdir().unwrap();
    let route_file = common::write_route_file(&dir, &["only-one"]);
    let port = common::free_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let shutdown = Shutdown::new();
    let task = tokio::spawn(lifecycle::run(config_for(route_file, port), shutdown.clone()));
    common::wait_until_listening(addr).await;

    let client = common::client();

    let res = client.get(format!("http://{addr}/healthz")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().is_empty());

    let res = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "decision": "only-one" }));

    let res = client.get(format!("http://{addr}/nonexistent")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("lifecycle should stop")
        .unwrap();
    assert!(result.is_ok(), "clean stop expected: {result:?}");

    // Port is released once run() returns.
    std::net::TcpListener::bind(addr).expect("port should be free");
}

#[tokio::test]
async fn test_decisions_cover_route_list() {
    let dir = tempfile::tempdir().unwrap();
    let keys = ["a", "b", "c"];
    let route_file = common::write_route_file(&dir, &keys);
    let port = common::free_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let shutdown = Shutdown::new();
    let task = tokio::spawn(lifecycle::run(config_for(route_file, port), shutdown.clone()));
    common::wait_until_listening(addr).await;

    let client = common::client();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let body: Value = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let decision = body["decision"].as_str().unwrap().to_string();
        assert!(keys.contains(&decision.as_str()));
        seen.insert(decision);
    }
    assert_eq!(seen.len(), keys.len());

    shutdown.trigger();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_empty_route_list_serves_500() {
    let dir = tempfile::tempdir().unwrap();
    let route_file = common::write_route_file(&dir, &[]);
    let port = common::free_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let shutdown = Shutdown::new();
    let task = tokio::spawn(lifecycle::run(config_for(route_file, port), shutdown.clone()));
    common::wait_until_listening(addr).await;

    let res = common::client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);

    shutdown.trigger();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_missing_route_file_never_binds() {
    let dir = tempfile::tempdir().unwrap();
    let port = common::free_port();

    let result = lifecycle::run(
        config_for(dir.path().join("absent.json"), port),
        Shutdown::new(),
    )
    .await;

    match result {
        Err(LifecycleError::Config(e)) => assert!(e.to_string().contains("absent.json")),
        other => panic!("expected config error, got {other:?}"),
    }
    std::net::TcpListener::bind(("127.0.0.1", port)).expect("port should never have been bound");
}

#[tokio::test]
async fn test_port_in_use_is_listen_error() {
    let dir = tempfile::tempdir().unwrap();
    let route_file = common::write_route_file(&dir, &["a"]);
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        lifecycle::run(config_for(route_file, port), Shutdown::new()),
    )
    .await
    .expect("bind failure should end run");

    assert!(matches!(
        result,
        Err(LifecycleError::Server(ServerError::Listen { .. }))
    ));
    drop(occupied);
}
