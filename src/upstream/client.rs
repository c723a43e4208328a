//! HTTP client for the upstream card API.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};

use crate::config::UpstreamConfig;
use crate::http::query;
use crate::http::response::RelayError;

/// Header forwarded verbatim from caller to upstream.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Status and body of an upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Client bound to the single configured upstream.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client with the configured connect and request timeouts.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// URL a request carrying `query` as its `q` value is forwarded to.
    pub fn url_for(&self, query: Option<&str>) -> String {
        query::upstream_url(&self.base_url, query)
    }

    /// GET the upstream and buffer its reply.
    ///
    /// Any status code counts as a reply; only transport failures are errors.
    pub async fn fetch(
        &self,
        query: Option<&str>,
        api_key: Option<HeaderValue>,
    ) -> Result<UpstreamReply, RelayError> {
        let url = self.url_for(query);
        let mut request = self.client.get(&url);

        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(UpstreamReply { status, body })
    }
}
