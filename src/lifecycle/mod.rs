//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate config → Load route list → Build server → Listen
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Stop accepting → Drain (bounded) → Quiescence → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown (once)
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, run_tracked, LifecycleError, Phase, PhaseLog};
