//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router; every path lands on one handler
//! - Admit a bounded number of requests at once (one by default)
//! - Answer CORS preflights, relay GETs, refuse everything else
//! - Serve until the shutdown receiver fires

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::RelayConfig;
use crate::http::response::{self, RelayError};
use crate::http::{cors, query};
use crate::lifecycle::shutdown;
use crate::upstream::{UpstreamClient, API_KEY_HEADER};

/// Error type for server construction and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The upstream HTTP client could not be built.
    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    /// The accept loop failed.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    /// Per-request events are only emitted when set.
    pub access_log: bool,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new relay server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let state = AppState {
            upstream: UpstreamClient::new(&config.upstream)?,
            access_log: config.observability.access_log,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with its middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        // Every path, including `OPTIONS *`, is relayed, so there are no routes.
        let router = Router::new()
            .fallback(relay_handler)
            .with_state(state)
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_in_flight,
            ));

        if config.observability.access_log {
            router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
        } else {
            router
        }
    }

    /// Run the server on `listener` until `shutdown_rx` fires.
    ///
    /// In-flight requests finish before this returns.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            max_in_flight = self.config.listener.max_in_flight,
            "Relay server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("Relay server stopped");
        Ok(())
    }
}

/// Entry point for every request.
async fn relay_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    match method {
        Method::OPTIONS => cors::preflight_response(),
        Method::GET => match forward(&state, &uri, &headers).await {
            Ok(response) => response,
            Err(e) => {
                if state.access_log {
                    tracing::warn!(error = %e.message(), "Upstream request failed");
                }
                e.into_response()
            }
        },
        _ => response::method_not_allowed(),
    }
}

/// Relay a GET: only `q` and `X-Api-Key` cross over to the upstream.
async fn forward(
    state: &AppState,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<Response, RelayError> {
    let q = query::extract_query(uri.query());
    let api_key = headers.get(API_KEY_HEADER).cloned();

    let forwards_key = api_key.is_some();

    let reply = state.upstream.fetch(q.as_deref(), api_key).await?;
    if state.access_log {
        tracing::info!(
            url = %state.upstream.url_for(q.as_deref()),
            api_key = forwards_key,
            status = %reply.status,
            "Relayed request"
        );
    }
    Ok(response::json_response(reply.status, reply.body))
}
