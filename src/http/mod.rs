//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum-server)
//!     → request.rs (request ID)
//!     → middleware/access_log.rs (timing, structured log line)
//!     → handlers.rs (/healthz, /, fallback 404)
//!     → response.rs (errors to status codes, error kept for the log)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, RecordedError};
pub use server::{serve_with_grace, AppState, HttpServer, ServerError};
