//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatch handler
//! - Wire up the envelope middleware and request tracing
//! - Inject the Host collaborator into handlers via state
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - One catch-all route: path matching is the gateway's own concern
//!   (version router + route tables), not the framework router's
//! - No request timeout layer: launch and proxy run to Host completion
//! - The Host is passed in by parameter at construction, never global

use std::sync::Arc;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::host::Host;
use crate::http::envelope;
use crate::http::handlers;
use crate::lifecycle::signals;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// The external session launcher collaborator.
    pub host: Arc<dyn Host>,
    /// Target of the index redirect document.
    pub index_redirect: String,
}

/// HTTP server for the session gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and Host.
    pub fn new(config: GatewayConfig, host: Arc<dyn Host>) -> Self {
        let state = AppState {
            host,
            index_redirect: config.index.redirect_url.clone(),
        };
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router. Every path funnels into `dispatch`; the
    /// envelope middleware wraps all of it.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(handlers::dispatch))
            .route("/", any(handlers::dispatch))
            .with_state(state)
            .layer(middleware::from_fn(envelope::envelope))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener,
    /// until a termination signal or a shutdown trigger arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::terminate() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
