//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup and failure events
//!     → logging.rs (tracing subscriber, env filter)
//!     → stdout
//!
//! Per-request events (only with observability.access_log)
//!     → tower-http TraceLayer installed by RelayServer
//! ```

pub mod logging;

pub use logging::init_logging;
