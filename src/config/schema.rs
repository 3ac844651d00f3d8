//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files,
//! and every field has a default so a minimal (or empty) config works.

use serde::{Deserialize, Serialize};

/// Root configuration for the session gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Launcher (Host) endpoints.
    pub launcher: LauncherConfig,

    /// Index page settings.
    pub index: IndexConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8888").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8888".to_string(),
        }
    }
}

/// Launcher (Host) endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Base URL of the launcher API.
    pub base_url: String,

    /// Base URL under which running sessions are reachable.
    pub session_base_url: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9090".to_string(),
            session_base_url: "http://127.0.0.1:9090/sessions".to_string(),
        }
    }
}

/// Index page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Where the index document points browsers. Served as an HTML
    /// meta-refresh rather than a 3xx so load-balancer health checks
    /// that do not follow redirects still see a 200.
    pub redirect_url: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            redirect_url: "/v1/manifest".to_string(),
        }
    }
}
