//! Response shaping for the relay.
//!
//! # Responsibilities
//! - Turn an upstream reply into a client response (status + body bytes)
//! - Map forwarding failures to a uniform 500 JSON body
//! - Make sure CORS and content-type headers are present on both paths
//!
//! # Design Decisions
//! - Upstream headers are not copied; only the status and body pass through
//! - Non-2xx upstream statuses are relayed as-is, never treated as errors
//! - Error text is inlined verbatim under the `error` key

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};
use serde_json::json;
use thiserror::Error;

use crate::http::cors;

/// A request-forwarding failure.
///
/// Renders as HTTP 500 with `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Building, sending, or reading the upstream request failed.
    #[error(transparent)]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    /// The error with its source chain, e.g.
    /// `error sending request for url (...): client error (Connect): Connection refused`.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }

    /// JSON body sent to the caller.
    pub fn body(&self) -> String {
        json!({ "error": self.message() }).to_string()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        json_response(StatusCode::INTERNAL_SERVER_ERROR, Bytes::from(self.body()))
    }
}

/// Build a relayed response: given status, raw body, CORS + JSON headers.
pub fn json_response(status: StatusCode, body: Bytes) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    cors::apply_response_headers(response.headers_mut());
    response
}

/// Reply for methods the relay does not serve.
pub fn method_not_allowed() -> Response<Body> {
    let body = json!({ "error": "Method not allowed" }).to_string();
    let mut response = json_response(StatusCode::METHOD_NOT_ALLOWED, Bytes::from(body));
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, OPTIONS"));
    response
}
