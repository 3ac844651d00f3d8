//! API version classification.
//!
//! # Responsibilities
//! - Decide which API generation a raw path belongs to
//! - Fall through to the index route for the bare root path
//! - Report an explicit no-match for everything else
//!
//! # Design Decisions
//! - Rules are evaluated in fixed order: v1, then v0, then index
//! - Classification looks only at the path, never the query string
//! - Two generations coexist so clients can migrate without duplication

/// API generation of a classified request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V0,
    V1,
}

impl ApiVersion {
    /// Path marker that places a request in this generation.
    pub fn marker(self) -> &'static str {
        match self {
            ApiVersion::V0 => "/v0/",
            ApiVersion::V1 => "/v1/",
        }
    }
}

/// Outcome of classifying a raw request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Path belongs to a versioned API generation.
    Versioned(ApiVersion),
    /// Exactly the root path.
    Index,
    /// No rule matched.
    NoMatch,
}

/// Classify a raw request path. First matching rule wins.
pub fn classify(path: &str) -> PathClass {
    if path.contains(ApiVersion::V1.marker()) {
        PathClass::Versioned(ApiVersion::V1)
    } else if path.contains(ApiVersion::V0.marker()) {
        PathClass::Versioned(ApiVersion::V0)
    } else if path == "/" {
        PathClass::Index
    } else {
        PathClass::NoMatch
    }
}
