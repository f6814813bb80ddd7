//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::process::Stdio;
use std::time::Duration;

use chaos_backend::config::{HealthMode, ServerConfig};
use chaos_backend::http::HttpServer;
use chaos_backend::lifecycle::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::process::{Child, Command};

/// Start an in-process server on `addr`. Trigger the returned handle to stop it.
pub async fn start_server(addr: SocketAddr, mode: HealthMode) -> Shutdown {
    let mut config = ServerConfig::default();
    config.listener.host = addr.ip().to_string();
    config.listener.port = addr.port();
    config.mode = mode;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = server.bind().await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    wait_for_port(addr).await;
    shutdown
}

/// Spawn the compiled `chaos-backend` binary.
pub fn spawn_binary(args: &[&str]) -> Child {
    spawn_binary_with_filter(args, "chaos_backend=info")
}

/// Spawn the binary with an explicit `RUST_LOG` filter.
pub fn spawn_binary_with_filter(args: &[&str], filter: &str) -> Child {
    Command::new(env!("CARGO_BIN_EXE_chaos-backend"))
        .args(args)
        .env_remove("NOMAD_PORT_http")
        .env("RUST_LOG", filter)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .unwrap()
}

/// Poll until something accepts connections on `addr`.
pub async fn wait_for_port(addr: SocketAddr) {
    for _ in 0..100 {
        if TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("nothing listening on {}", addr);
}

/// Send a raw HTTP/1.1 request and return the full response text.
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

/// Client that does not reuse connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
