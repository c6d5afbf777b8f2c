//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ROUTE_LIST_FILE_PATH (or default path)
//!     → schema.rs (resolve path, RouteList shape)
//!     → loader.rs (stat, read & deserialize)
//!     → RouteList (immutable, handed to routing::RouteCache)
//!
//! CLI flags
//!     → ServerConfig (validated, immutable)
//!     → shared with http and lifecycle
//! ```
//!
//! # Design Decisions
//! - The route file is read once at startup; there is no watcher
//! - Path resolution is override-then-default, never hardcoded
//! - Missing or null `route-keys` deserialize to an empty list

pub mod loader;
pub mod schema;

pub use loader::{load_route_list, ConfigError};
pub use schema::RouteList;
pub use schema::ServerConfig;
pub use schema::{route_file_path, route_file_path_from};
