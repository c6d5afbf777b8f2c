//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     config::load_route_list(path)
//!     → cache.rs (atomic swap into RouteCache)
//!
//! GET /:
//!     cache.rs (lock-free snapshot)
//!     → selector.rs (uniform pick)
//!     → RouteDecision or SelectionError::Empty
//! ```
//!
//! # Design Decisions
//! - The cache is an injected handle, not a global
//! - Reloads swap a whole `Arc<RouteList>`; readers never see a partial list
//! - Selection is stateless per call (no memory of earlier picks)

pub mod cache;
pub mod selector;

pub use cache::RouteCache;
pub use selector::{
    pick_random, RouteDecision, RouteSelector, SeededRandom, SelectionError, UniformRandom,
};
