//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use httpmock::MockServer;
use nasa_media_proxy::config::{ApiKey, ProxyConfig, UpstreamTargets};
use nasa_media_proxy::{HttpServer, Shutdown};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";

pub const SEARCH_PATH: &str = "/search";
pub const EPIC_PATH: &str = "/EPIC/api/natural";
pub const APOD_PATH: &str = "/planetary/apod";

/// Config whose upstream targets all live on `server`.
pub fn mock_config(server: &MockServer) -> ProxyConfig {
    config_with_targets(UpstreamTargets {
        media_search: server.url(SEARCH_PATH),
        epic: server.url(EPIC_PATH),
        apod: server.url(APOD_PATH),
    })
}

pub fn config_with_targets(targets: UpstreamTargets) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.api_key = ApiKey::new(API_KEY);
    config.upstream.timeout_secs = 5;
    config.upstream.targets = targets;
    config
}

/// Base URL of a port nothing listens on.
pub fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Config whose upstream targets all refuse connections.
pub fn unreachable_config() -> ProxyConfig {
    let base = unreachable_base();
    config_with_targets(UpstreamTargets {
        media_search: format!("{}{}", base, SEARCH_PATH),
        epic: format!("{}{}", base, EPIC_PATH),
        apod: format!("{}{}", base, APOD_PATH),
    })
}

pub fn router(config: ProxyConfig) -> Router {
    HttpServer::new(config).unwrap().router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

/// Send one request through the router in-process.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    TestResponse { status, headers, body }
}

pub async fn get(router: Router, uri: &str) -> TestResponse {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// Serve `config` on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Start a raw backend that answers every request with `body` and records
/// each request target (path and query) it receives.
pub async fn start_recording_backend(body: &'static str) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let record = record.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&head);
                if let Some(target) = head.lines().next().and_then(|l| l.split(' ').nth(1)) {
                    record.lock().unwrap().push(target.to_string());
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, seen)
}
