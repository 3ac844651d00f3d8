//! Host collaborator subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (manifest / launch / proxy)
//!     → Host trait (awaited, one outstanding call per request)
//!     → client.rs (HTTP calls to the launcher and running sessions)
//!     → Return: document / session descriptor / relayed response
//! ```
//!
//! # Design Decisions
//! - The Host is an explicitly constructed collaborator, built once at
//!   startup and passed into the server by parameter, never a global
//! - The gateway holds no session state; every call is self-contained
//! - No gateway-imposed timeout: launch and proxy run to the Host's own
//!   completion or failure (provisioning can take tens of seconds)

pub mod client;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

pub use client::LauncherClient;

/// Errors surfaced by Host operations.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The upstream session or launcher answered with an error status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// The Host could not be reached or the exchange broke down before
    /// any status was produced.
    #[error("{0}")]
    Transport(String),
}

/// Result type for Host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Response relayed back from a running session, verbatim.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// External collaborator that starts, stops, and proxies into
/// ephemeral compute sessions.
#[async_trait]
pub trait Host: Send + Sync {
    /// Fetch the capability manifest, optionally narrowed to the given
    /// environ identifiers. Never cached by the gateway.
    async fn manifest(&self, filter: Option<Vec<String>>) -> HostResult<serde_json::Value>;

    /// Launch a session for the environment. May suspend for the full
    /// provisioning duration; the shape of the returned descriptor is
    /// Host-defined.
    async fn launch(&self, environ_id: &str) -> HostResult<serde_json::Value>;

    /// Perform one upstream HTTP call into a running session. Fails
    /// with an attached status when the upstream answers with an error
    /// or is unreachable through the launcher.
    async fn proxy(
        &self,
        method: Method,
        session_id: &str,
        token: &str,
        path: &str,
        body: Option<Bytes>,
    ) -> HostResult<UpstreamResponse>;
}
