//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT and SIGTERM
//! - Translate the first one received into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A second signal during shutdown is ignored, not escalated

use std::fmt;

use crate::lifecycle::Shutdown;

/// Termination signal that ended serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => write!(f, "SIGINT"),
            Signal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Wait for SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn wait_for_termination() -> std::io::Result<Signal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| Signal::Interrupt),
        _ = terminate.recv() => Ok(Signal::Terminate),
    }
}

/// Wait for Ctrl+C (SIGTERM does not exist here).
#[cfg(not(unix))]
pub async fn wait_for_termination() -> std::io::Result<Signal> {
    tokio::signal::ctrl_c().await.map(|_| Signal::Interrupt)
}

/// Trigger `shutdown` on the first termination signal.
///
/// If handlers cannot be installed the error is logged and the task waits
/// for shutdown to come from elsewhere.
pub async fn listen(shutdown: Shutdown) {
    match wait_for_termination().await {
        Ok(signal) => {
            tracing::info!(signal = %signal, "Termination signal received");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install signal handlers");
            shutdown.wait().await;
        }
    }
}
