//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → envelope.rs (preflight short-circuit, CORS/Server headers)
//!     → handlers.rs (version dispatch, manifest/lifecycle/proxy)
//!     → Send to client
//! ```

pub mod envelope;
pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
