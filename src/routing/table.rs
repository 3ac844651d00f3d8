//! Per-version route templates.
//!
//! # Responsibilities
//! - Decompose a classified path into a handler kind plus parameters
//! - Evaluate the templates in fixed order: manifest, lifecycle, proxy
//! - Report an explicit no-match when no template applies
//!
//! # Design Decisions
//! - The manifest filter is the path segment preceding the version
//!   marker, comma-split verbatim; empty segment means no filter
//! - Proxy addressing splits on the FIRST `@` only; the token runs to
//!   the next `/`; the remainder is the sub-path, relayed untouched
//! - All captured parameters are opaque to the gateway

use crate::routing::version::ApiVersion;

/// Handler kind selected by the route table, with extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// Capability manifest request, with optional environ filter.
    Manifest { filter: Option<Vec<String>> },
    /// Session launch/stop request for a named environment.
    Lifecycle { environ_id: String },
    /// Passthrough into a running session.
    Proxy {
        session_id: String,
        token: String,
        subpath: String,
    },
}

/// Match a path against the version's ordered templates.
/// First matching template wins; `None` means no route exists.
pub fn match_route(version: ApiVersion, path: &str) -> Option<RouteMatch> {
    match_manifest(version, path)
        .or_else(|| match_lifecycle(version, path))
        .or_else(|| match_proxy(version, path))
}

/// `<optional filter>/v{N}/manifest` with an optional trailing slash.
fn match_manifest(version: ApiVersion, path: &str) -> Option<RouteMatch> {
    let marker = match version {
        ApiVersion::V0 => "/v0/manifest",
        ApiVersion::V1 => "/v1/manifest",
    };
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let prefix = trimmed.strip_suffix(marker)?;
    // Drop the leading slash every absolute path carries; what remains
    // is the filter segment.
    let segment = prefix.strip_prefix('/').unwrap_or(prefix);
    let filter = if segment.is_empty() {
        None
    } else {
        Some(segment.split(',').map(str::to_string).collect())
    };
    Some(RouteMatch::Manifest { filter })
}

/// `.../v{N}/environ(s)/<environ_id>` where the id is the path remainder.
fn match_lifecycle(version: ApiVersion, path: &str) -> Option<RouteMatch> {
    let marker = match version {
        ApiVersion::V0 => "/v0/environ/",
        ApiVersion::V1 => "/v1/environs/",
    };
    let at = path.find(marker)?;
    let environ_id = &path[at + marker.len()..];
    if environ_id.is_empty() {
        return None;
    }
    Some(RouteMatch::Lifecycle {
        environ_id: environ_id.to_string(),
    })
}

/// `.../v{N}/proxy/<session_id>@<token>/<path>`.
fn match_proxy(version: ApiVersion, path: &str) -> Option<RouteMatch> {
    let marker = match version {
        ApiVersion::V0 => "/v0/proxy/",
        ApiVersion::V1 => "/v1/proxy/",
    };
    let at = path.find(marker)?;
    let rest = &path[at + marker.len()..];
    // Split on the first `@`: session ids never contain one, tokens may.
    let (session_id, rest) = rest.split_once('@')?;
    let (token, subpath) = rest.split_once('/')?;
    if session_id.is_empty() || token.is_empty() || subpath.is_empty() {
        return None;
    }
    Some(RouteMatch::Proxy {
        session_id: session_id.to_string(),
        token: token.to_string(),
        subpath: subpath.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_without_filter() {
        let m = match_route(ApiVersion::V1, "/v1/manifest").unwrap();
        assert_eq!(m, RouteMatch::Manifest { filter: None });
        // Trailing slash tolerated.
        let m = match_route(ApiVersion::V1, "/v1/manifest/").unwrap();
        assert_eq!(m, RouteMatch::Manifest { filter: None });
    }

    #[test]
    fn test_manifest_filter_is_comma_split() {
        let m = match_route(ApiVersion::V1, "/r-3.4,py-2.7/v1/manifest").unwrap();
        assert_eq!(
            m,
            RouteMatch::Manifest {
                filter: Some(vec!["r-3.4".into(), "py-2.7".into()])
            }
        );
    }

    #[test]
    fn test_lifecycle_id_is_path_remainder() {
        let m = match_route(ApiVersion::V1, "/v1/environs/stencila/core").unwrap();
        assert_eq!(
            m,
            RouteMatch::Lifecycle {
                environ_id: "stencila/core".into()
            }
        );
        // v0 uses the singular segment.
        let m = match_route(ApiVersion::V0, "/v0/environ/py-jupyter").unwrap();
        assert_eq!(
            m,
            RouteMatch::Lifecycle {
                environ_id: "py-jupyter".into()
            }
        );
        assert!(match_route(ApiVersion::V0, "/v0/environs/py-jupyter").is_none());
    }

    #[test]
    fn test_proxy_splits_on_first_at_sign() {
        let m = match_route(ApiVersion::V1, "/v1/proxy/abc@tok123/some/sub/path").unwrap();
        assert_eq!(
            m,
            RouteMatch::Proxy {
                session_id: "abc".into(),
                token: "tok123".into(),
                subpath: "some/sub/path".into(),
            }
        );
        // A second `@` belongs to the token.
        let m = match_route(ApiVersion::V1, "/v1/proxy/abc@to@k/x").unwrap();
        assert_eq!(
            m,
            RouteMatch::Proxy {
                session_id: "abc".into(),
                token: "to@k".into(),
                subpath: "x".into(),
            }
        );
    }

    #[test]
    fn test_proxy_requires_all_three_parts() {
        assert!(match_route(ApiVersion::V1, "/v1/proxy/abc").is_none());
        assert!(match_route(ApiVersion::V1, "/v1/proxy/abc@tok").is_none());
        assert!(match_route(ApiVersion::V1, "/v1/proxy/abc@tok/").is_none());
        assert!(match_route(ApiVersion::V1, "/v1/proxy/@tok/x").is_none());
    }

    #[test]
    fn test_templates_evaluated_in_order() {
        // The manifest template wins over a hypothetical later match.
        let m = match_route(ApiVersion::V1, "/v1/manifest").unwrap();
        assert!(matches!(m, RouteMatch::Manifest { .. }));
        // No template at all.
        assert!(match_route(ApiVersion::V1, "/v1/unknown").is_none());
    }
}
