//! Route key picker library.
//!
//! Serves a uniformly random key from a JSON route list loaded at startup.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::{RouteList, ServerConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::RouteCache;
