//! card-relay: local CORS relay for the Pokémon TCG card API.
//!
//! ```text
//!   browser ──GET /?q=..──▶ card-relay :8080 ──GET /v2/cards?q=..──▶ api.pokemontcg.io
//!           ◀─ + CORS ─────                ◀──────────────────────
//! ```

use std::path::PathBuf;

use clap::Parser;

use card_relay::config::resolve_config;
use card_relay::lifecycle::{signals, Shutdown};
use card_relay::observability::init_logging;
use card_relay::{net, RelayServer};

#[derive(Parser)]
#[command(name = "card-relay")]
#[command(about = "Local CORS relay for the Pokémon TCG card API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.upstream.request_timeout_secs,
        access_log = config.observability.access_log,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener).await?;
    let server = RelayServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    tracing::info!("Press Ctrl+C to stop");
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
