//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed by value into the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - One fixed listen port; nothing else is environment-derived

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::{GatewayConfig, IndexConfig, LauncherConfig, ListenerConfig};
