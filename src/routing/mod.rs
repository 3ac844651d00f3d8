//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, method)
//!     → version.rs (classify into v1 / v0 / index / no-match)
//!     → table.rs (ordered templates per version, first match wins)
//!     → Return: RouteMatch with extracted parameters, or NoMatch
//! ```
//!
//! # Design Decisions
//! - Version precedence is fixed: v1 before v0 before index
//! - Templates are evaluated top-to-bottom; first match wins
//! - No regex in the hot path; plain substring/split decomposition
//! - Deterministic: same path always produces the same match

pub mod table;
pub mod version;

pub use table::{match_route, RouteMatch};
pub use version::{classify, ApiVersion, PathClass};
