//! Uniform response envelope: CORS, identification, preflight.
//!
//! # Responsibilities
//! - Stamp every response with Server and CORS headers
//! - Answer `OPTIONS`/`HEAD` on any path with 204 and no body
//! - Default the Content-Type to JSON when a handler set none
//!
//! # Design Decisions
//! - `Access-Control-Allow-Origin` echoes the request Origin verbatim
//!   (empty when absent), never `*`, so credentialed cross-origin
//!   requests are permitted
//! - Allowed methods/headers and the preflight max-age are fixed
//! - The envelope is a middleware layer so no handler can forget it

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Server identification stamped on every response.
pub const SERVER_IDENT: &str = concat!("session-gateway/", env!("CARGO_PKG_VERSION"));

/// Methods a cross-origin caller may use.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Headers a cross-origin caller may send.
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// How long browsers may cache a preflight result, in seconds.
pub const MAX_AGE: &str = "86400";

/// Upstream headers never copied onto a forwarded response. They
/// describe upstream transport framing and must be recomputed for the
/// gateway's own connection.
pub const EXCLUDED_UPSTREAM_HEADERS: [HeaderName; 4] = [
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONTENT_ENCODING,
    header::CONNECTION,
];

/// Middleware applying the envelope to every response.
///
/// `OPTIONS` and `HEAD` short-circuit to 204 before any handler runs;
/// they serve CORS preflight and load-balancer health checks.
pub async fn envelope(request: Request<Body>, next: Next) -> Response {
    let origin = request.headers().get(header::ORIGIN).cloned();
    let method = request.method().clone();

    let mut response = if method == Method::OPTIONS || method == Method::HEAD {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::SERVER, HeaderValue::from_static(SERVER_IDENT));
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        origin.unwrap_or_else(|| HeaderValue::from_static("")),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE),
    );
    response
}

/// Index document: an HTML redirect rather than a 3xx, so health
/// checks that do not follow redirects still succeed.
pub fn index_document(redirect_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <meta http-equiv="refresh" content="0; URL='{redirect_url}'" />
    </head>
    <body>
        <script>window.location = "{redirect_url}";</script>
    </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_set_members() {
        assert!(EXCLUDED_UPSTREAM_HEADERS.contains(&header::CONTENT_LENGTH));
        assert!(EXCLUDED_UPSTREAM_HEADERS.contains(&header::TRANSFER_ENCODING));
        assert!(EXCLUDED_UPSTREAM_HEADERS.contains(&header::CONTENT_ENCODING));
        assert!(EXCLUDED_UPSTREAM_HEADERS.contains(&header::CONNECTION));
        assert!(!EXCLUDED_UPSTREAM_HEADERS.contains(&header::CONTENT_TYPE));
    }

    #[test]
    fn test_index_document_embeds_target() {
        let doc = index_document("/v1/manifest");
        assert!(doc.contains("meta http-equiv=\"refresh\""));
        assert!(doc.contains("window.location = \"/v1/manifest\""));
    }

    #[test]
    fn test_server_ident_carries_version() {
        assert!(SERVER_IDENT.starts_with("session-gateway/"));
    }
}
