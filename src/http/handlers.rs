//! Request dispatch and the per-kind handlers.
//!
//! # Responsibilities
//! - Classify the path and walk the version's route table
//! - Manifest: fetch from Host, optionally filtered, as indented JSON
//! - Lifecycle: launch on POST, no-op 200 on DELETE
//! - Proxy: relay method/body upstream and copy back the response
//!
//! # Design Decisions
//! - Handlers are stateless per request; the only shared piece is the
//!   Host collaborator held in `AppState`
//! - A matched route with an unsupported method is a 404, same as an
//!   unmatched path
//! - The proxy is an address-translating passthrough: session id,
//!   token, and payload semantics are opaque to the gateway

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::error::{GatewayError, GatewayResult};
use crate::host::UpstreamResponse;
use crate::http::envelope::{self, EXCLUDED_UPSTREAM_HEADERS};
use crate::http::server::AppState;
use crate::routing::{classify, match_route, PathClass, RouteMatch};

/// Single entry point behind the catch-all route. Walks the version
/// router and route table, then hands off to the matching handler.
pub async fn dispatch(
    State(state): State<AppState>,
    request: Request<Body>,
) -> GatewayResult<Response> {
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let method = request.method().clone();

    match classify(&path) {
        PathClass::Index if method == Method::GET => Ok(index(&state)),
        PathClass::Versioned(version) => {
            // Tokens ride in the path; log the method only.
            let route = match_route(version, &path).ok_or(GatewayError::NotFound)?;
            tracing::debug!(method = %method, version = ?version, "Route matched");
            match route {
                RouteMatch::Manifest { filter } if method == Method::GET => {
                    manifest(&state, filter).await
                }
                RouteMatch::Lifecycle { environ_id } if method == Method::POST => {
                    launch(&state, &environ_id).await
                }
                RouteMatch::Lifecycle { .. } if method == Method::DELETE => Ok(stop()),
                RouteMatch::Proxy {
                    session_id,
                    token,
                    subpath,
                } if method == Method::GET || method == Method::POST || method == Method::PUT => {
                    forward(&state, method, &session_id, &token, subpath, query, request).await
                }
                _ => Err(GatewayError::NotFound),
            }
        }
        _ => Err(GatewayError::NotFound),
    }
}

/// `GET /` — informational redirect document.
fn index(state: &AppState) -> Response {
    Html(envelope::index_document(&state.index_redirect)).into_response()
}

/// `GET .../v{N}/manifest` — fetch the capability manifest from Host,
/// synchronously per request, never cached.
async fn manifest(state: &AppState, filter: Option<Vec<String>>) -> GatewayResult<Response> {
    let document = state.host.manifest(filter).await?;
    json_document(&document)
}

/// `POST .../v{N}/environ(s)/<id>` — launch a session. May suspend for
/// the full provisioning duration; no gateway timeout applies.
async fn launch(state: &AppState, environ_id: &str) -> GatewayResult<Response> {
    let descriptor = state.host.launch(environ_id).await?;
    json_document(&descriptor)
}

/// `DELETE .../v{N}/environ(s)/<id>` — always 200, empty body. Session
/// teardown is owned by Host; this exists for API symmetry with older
/// clients that issue defensive stop calls.
fn stop() -> Response {
    StatusCode::OK.into_response()
}

/// `GET|POST|PUT .../v{N}/proxy/<session>@<token>/<path>` — relay into
/// the running session and copy back status/headers/body.
async fn forward(
    state: &AppState,
    method: Method,
    session_id: &str,
    token: &str,
    subpath: String,
    query: Option<String>,
    request: Request<Body>,
) -> GatewayResult<Response> {
    // Raw, unparsed body for POST/PUT only.
    let body = if method == Method::POST || method == Method::PUT {
        let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .map_err(|e| GatewayError::Validation(format!("unreadable request body: {e}")))?;
        Some(bytes)
    } else {
        None
    };

    // The URL remainder is relayed verbatim, query string included.
    let full_path = match query {
        Some(q) => format!("{subpath}?{q}"),
        None => subpath,
    };

    let upstream = state
        .host
        .proxy(method, session_id, token, &full_path, body)
        .await?;
    Ok(relay(upstream))
}

/// Copy an upstream response outward: every header except the fixed
/// exclusion set, appended so duplicate names survive; Content-Length
/// recomputed from the forwarded body.
fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = upstream.status;

    let headers = response.headers_mut();
    for (name, value) in upstream.headers.iter() {
        if EXCLUDED_UPSTREAM_HEADERS.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if !upstream.body.is_empty() {
        headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from(upstream.body.len()),
        );
        *response.body_mut() = Body::from(upstream.body);
    }
    response
}

/// Serialize a Host document as indented JSON, status 200.
fn json_document(value: &serde_json::Value) -> GatewayResult<Response> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| GatewayError::Transport(format!("unserializable document: {e}")))?;
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}
