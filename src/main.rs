//! NASA media proxy.
//!
//! Forwards a fixed set of routes to the NASA Image and Video Library,
//! EPIC and APOD APIs, injecting the API key and normalizing errors.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 NASA MEDIA PROXY             │
//!     Client Request     │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ───────────────────┼─▶│  http   │───▶│ handlers │───▶│forwarder│──┼──▶ images-api.nasa.gov
//!                        │  │ server  │    │          │    │         │  │    api.nasa.gov/EPIC
//!     Client Response    │  │ + layers│◀───│ envelope │◀───│ reqwest │◀─┼─── api.nasa.gov/planetary
//!     ◀──────────────────┼──└─────────┘    └──────────┘    └─────────┘  │
//!                        │                                              │
//!                        │  ┌──────────┐ ┌───────────────┐ ┌─────────┐  │
//!                        │  │  config  │ │ observability │ │lifecycle│  │
//!                        │  └──────────┘ └───────────────┘ └─────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use nasa_media_proxy::config::load_config;
use nasa_media_proxy::lifecycle::{self, signals, Shutdown};
use nasa_media_proxy::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "nasa-media-proxy", version)]
#[command(about = "HTTP proxy for NASA media, EPIC and APOD APIs", long_about = None)]
struct Cli {
    /// TOML configuration file (falls back to NASA_PROXY_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os("NASA_PROXY_CONFIG").map(PathBuf::from));
    let mut config = load_config(config_path.as_deref())?;
    if let Some(host) = cli.host {
        config.listener.host = host;
    }
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    init_logging(&config.observability);
    tracing::info!("nasa-media-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    lifecycle::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
