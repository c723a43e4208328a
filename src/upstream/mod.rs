//! Upstream card API access.
//!
//! # Data Flow
//! ```text
//! RelayServer handler
//!     → client.rs (build URL, attach X-Api-Key, GET with timeouts)
//!     → UpstreamReply (status + body bytes)
//!     → back to the handler for CORS stamping
//! ```

pub mod client;

pub use client::{UpstreamClient, UpstreamReply, API_KEY_HEADER};
