//! Session gateway binary.
//!
//! ```text
//!                         ┌──────────────────────────────────────────┐
//!                         │              SESSION GATEWAY             │
//!                         │                                          │
//!     Client Request      │  ┌────────┐   ┌─────────┐   ┌─────────┐ │
//!     ────────────────────┼─▶│envelope│──▶│ version │──▶│  route  │ │
//!                         │  │ (CORS) │   │ router  │   │  table  │ │
//!                         │  └────────┘   └─────────┘   └────┬────┘ │
//!                         │                                   │      │
//!                         │                                   ▼      │
//!     Client Response     │  ┌────────────────┐   ┌──────────────┐  │
//!     ◀───────────────────┼──│ header filter /│◀──│ Host client  │◀─┼──── Launcher /
//!                         │  │  error mirror  │   │ (launch,     │  │     Session
//!                         │  └────────────────┘   │  proxy)      │  │
//!                         │                       └──────────────┘  │
//!                         └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_gateway::config::{load_config, GatewayConfig};
use session_gateway::host::LauncherClient;
use session_gateway::lifecycle::Shutdown;
use session_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "session-gateway", version, about = "HTTP gateway for ephemeral compute sessions")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("session-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        launcher = %config.launcher.base_url,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let host = Arc::new(LauncherClient::new(&config.launcher));
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config, host);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
