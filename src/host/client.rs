//! HTTP client for the session launcher.
//!
//! # Responsibilities
//! - Fetch the capability manifest from the launcher
//! - Request session launches and await the session descriptor
//! - Perform the upstream call for proxied requests
//! - Translate HTTP-level failures into `HostError`
//!
//! # Design Decisions
//! - One hyper client, connection-pooled, shared across all requests
//! - No request timeout anywhere: the launcher owns call duration
//! - Error statuses become `HostError::Upstream`; everything else
//!   (connect failures, broken exchanges) becomes `Transport`

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Method, Request, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::LauncherConfig;
use crate::host::{Host, HostError, HostResult, UpstreamResponse};

use async_trait::async_trait;

/// Host implementation backed by an HTTP session launcher.
#[derive(Clone)]
pub struct LauncherClient {
    client: Client<HttpConnector, Body>,
    /// Launcher API base, no trailing slash.
    base_url: String,
    /// Base under which running sessions are reachable, no trailing slash.
    session_base_url: String,
}

impl LauncherClient {
    /// Create a new launcher client from configuration.
    pub fn new(config: &LauncherConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_base_url: config.session_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue a request and buffer the full response.
    async fn exchange(
        &self,
        request: Request<Body>,
    ) -> HostResult<(StatusCode, axum::http::HeaderMap, Bytes)> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;
        Ok((parts.status, parts.headers, bytes))
    }

    /// Issue a request expected to produce a JSON document.
    async fn fetch_json(&self, uri: &str, method: Method) -> HostResult<serde_json::Value> {
        let uri: Uri = uri
            .parse()
            .map_err(|e| HostError::Transport(format!("invalid launcher uri: {e}")))?;
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let (status, _headers, bytes) = self.exchange(request).await?;
        if !status.is_success() {
            return Err(upstream_failure(status));
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| HostError::Transport(format!("launcher returned invalid JSON: {e}")))
    }
}

/// Failure message in `HTTP <code>: <reason>` form, mirroring what the
/// upstream client library reports.
fn upstream_failure(status: StatusCode) -> HostError {
    HostError::Upstream {
        status,
        message: format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
    }
}

#[async_trait]
impl Host for LauncherClient {
    async fn manifest(&self, filter: Option<Vec<String>>) -> HostResult<serde_json::Value> {
        let uri = match filter {
            Some(ids) => format!("{}/manifest?environs={}", self.base_url, ids.join(",")),
            None => format!("{}/manifest", self.base_url),
        };
        self.fetch_json(&uri, Method::GET).await
    }

    async fn launch(&self, environ_id: &str) -> HostResult<serde_json::Value> {
        let uri = format!("{}/environs/{}", self.base_url, environ_id);
        tracing::info!(environ_id = %environ_id, "Requesting session launch");
        self.fetch_json(&uri, Method::POST).await
    }

    async fn proxy(
        &self,
        method: Method,
        session_id: &str,
        token: &str,
        path: &str,
        body: Option<Bytes>,
    ) -> HostResult<UpstreamResponse> {
        let uri: Uri = format!("{}/{}/{}", self.session_base_url, session_id, path)
            .parse()
            .map_err(|e| HostError::Transport(format!("invalid session uri: {e}")))?;

        let token_value = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|e| HostError::Transport(format!("invalid access token: {e}")))?;

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, token_value)
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let (status, headers, bytes) = self.exchange(request).await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(upstream_failure(status));
        }
        Ok(UpstreamResponse {
            status,
            headers,
            body: bytes,
        })
    }
}
