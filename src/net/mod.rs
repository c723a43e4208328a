//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (parse address, bind)
//!     → TcpListener handed to RelayServer::run
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
