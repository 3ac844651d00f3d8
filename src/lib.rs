//! Session gateway library.
//!
//! An HTTP gateway in front of an external session launcher ("Host"):
//! advertises a capability manifest, launches ephemeral compute
//! sessions for named environments, and transparently proxies HTTP
//! traffic into a running session addressed by session id and token.

pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod lifecycle;
pub mod routing;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
