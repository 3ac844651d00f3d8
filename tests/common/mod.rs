//! Shared utilities for gateway integration tests.

// Each test binary compiles this module separately and uses a subset.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use tokio::net::TcpListener;

use session_gateway::config::GatewayConfig;
use session_gateway::host::{Host, HostResult, UpstreamResponse};
use session_gateway::lifecycle::Shutdown;
use session_gateway::HttpServer;

use async_trait::async_trait;

/// One recorded call to `Host::proxy`.
#[derive(Debug, Clone)]
pub struct ProxyCall {
    pub method: Method,
    pub session_id: String,
    pub token: String,
    pub path: String,
    pub body: Option<Bytes>,
}

/// Scriptable Host that records every call it receives.
pub struct MockHost {
    pub manifest_doc: serde_json::Value,
    pub launch_doc: serde_json::Value,
    pub proxy_result: Mutex<HostResult<UpstreamResponse>>,
    pub manifest_filters: Mutex<Vec<Option<Vec<String>>>>,
    pub launched: Mutex<Vec<String>>,
    pub proxy_calls: Mutex<Vec<ProxyCall>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            manifest_doc: serde_json::json!({ "environs": [] }),
            launch_doc: serde_json::json!({ "id": "x123" }),
            proxy_result: Mutex::new(Ok(UpstreamResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: Bytes::new(),
            })),
            manifest_filters: Mutex::new(Vec::new()),
            launched: Mutex::new(Vec::new()),
            proxy_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_manifest_doc(mut self, doc: serde_json::Value) -> Self {
        self.manifest_doc = doc;
        self
    }

    pub fn with_proxy_result(self, result: HostResult<UpstreamResponse>) -> Self {
        *self.proxy_result.lock().unwrap() = result;
        self
    }
}

#[async_trait]
impl Host for MockHost {
    async fn manifest(&self, filter: Option<Vec<String>>) -> HostResult<serde_json::Value> {
        self.manifest_filters.lock().unwrap().push(filter);
        Ok(self.manifest_doc.clone())
    }

    async fn launch(&self, environ_id: &str) -> HostResult<serde_json::Value> {
        self.launched.lock().unwrap().push(environ_id.to_string());
        Ok(self.launch_doc.clone())
    }

    async fn proxy(
        &self,
        method: Method,
        session_id: &str,
        token: &str,
        path: &str,
        body: Option<Bytes>,
    ) -> HostResult<UpstreamResponse> {
        self.proxy_calls.lock().unwrap().push(ProxyCall {
            method,
            session_id: session_id.to_string(),
            token: token.to_string(),
            path: path.to_string(),
            body,
        });
        self.proxy_result.lock().unwrap().clone()
    }
}

/// Start a gateway on an ephemeral port backed by the given Host.
/// Returns the base URL and the shutdown handle.
#[allow(dead_code)]
pub async fn start_gateway(host: Arc<dyn Host>) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(GatewayConfig::default(), host);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the server a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (format!("http://{addr}"), shutdown)
}
