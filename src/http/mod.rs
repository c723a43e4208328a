//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, admission limit, method dispatch)
//!     → cors.rs (OPTIONS answered locally)
//!     → query.rs (pick `q`, build upstream URL)
//!     → upstream client (GET with optional X-Api-Key)
//!     → response.rs (status + body passthrough, or 500 JSON)
//!     → Send to client
//! ```

pub mod cors;
pub mod query;
pub mod response;
pub mod server;

pub use response::RelayError;
pub use server::{RelayServer, ServerError};
