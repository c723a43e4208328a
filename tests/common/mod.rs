//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use card_relay::config::RelayConfig;
use card_relay::{RelayServer, Shutdown};
use tokio::net::TcpListener;

/// What the mock upstream saw for one request.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path_and_query: String,
    pub api_key: Option<String>,
    pub header_count: usize,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    seen: Arc<Mutex<Vec<Captured>>>,
}

/// A running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    /// Base URL the relay should forward to.
    pub fn base_url(&self) -> String {
        format!("http://{}/v2/cards", self.addr)
    }

    /// Requests received so far.
    pub fn captured(&self) -> Vec<Captured> {
        self.seen.lock().unwrap().clone()
    }
}

/// Start a mock upstream that answers every request with `status` and `body`
/// and records what it received.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_slow_upstream(status, body, Duration::ZERO).await
}

/// Like [`start_mock_upstream`], but every reply is held back by `delay`.
pub async fn start_slow_upstream(
    status: u16,
    body: &'static str,
    delay: Duration,
) -> MockUpstream {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        delay,
        seen: seen.clone(),
    };

    let app = Router::new().fallback(record).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, seen }
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, [(&'static str, &'static str); 1], &'static str) {
    let captured = Captured {
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        header_count: headers.get_all("x-api-key").iter().count(),
    };
    state.seen.lock().unwrap().push(captured);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, [("content-type", "text/plain")], state.body)
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A relay under test.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: tokio::task::JoinHandle<()>,
}

impl TestRelay {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

/// Start a relay in front of `upstream_base` on an ephemeral port.
pub async fn start_relay(upstream_base: &str) -> TestRelay {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = upstream_base.to_string();
    start_relay_with(config).await
}

/// Start a relay with a fully specified config.
pub async fn start_relay_with(config: RelayConfig) -> TestRelay {
    let listener = card_relay::net::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = RelayServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    TestRelay {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
