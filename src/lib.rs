//! Local CORS relay for the Pokémon TCG card API.
//!
//! Browsers calling `https://api.pokemontcg.io/v2/cards` directly from a
//! development page get blocked by cross-origin policy. Pointing them at this
//! relay instead forwards the `q` search parameter and the `X-Api-Key` header
//! upstream and hands the reply back with `Access-Control-Allow-Origin: *`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
