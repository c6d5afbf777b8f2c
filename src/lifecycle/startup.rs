//! Startup orchestration and the serving lifecycle.
//!
//! ```text
//! Init → LoadingConfig → Serving → ShuttingDown → Stopped
//! ```
//!
//! # Design Decisions
//! - Fail fast: an unreadable route list is fatal before anything binds,
//!   including the metrics exporter
//! - The listener starts last (traffic only when the cache is loaded)
//! - Shutdown has a timeout: forced close after the grace period

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{ConfigError, ServerConfig};
use crate::http::{AppState, HttpServer, ServerError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routing::RouteCache;

/// Error type for the service lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("error creating server: {0}")]
    Config(#[from] ConfigError),

    #[error("error starting metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Lifecycle phase of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Init,
    LoadingConfig,
    Serving,
    ShuttingDown,
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::LoadingConfig => "loading_config",
            Phase::Serving => "serving",
            Phase::ShuttingDown => "shutting_down",
            Phase::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Record of the phases a run has entered, in order.
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct PhaseLog {
    entered: Arc<Mutex<Vec<Phase>>>,
}

impl PhaseLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter(&self, phase: Phase) {
        tracing::info!(phase = %phase, "Lifecycle phase");
        self.entered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(phase);
    }

    /// Phases entered so far.
    pub fn history(&self) -> Vec<Phase> {
        self.entered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recently entered phase.
    pub fn current(&self) -> Option<Phase> {
        self.history().last().copied()
    }
}

/// Load the route list, serve until `shutdown` fires or SIGINT/SIGTERM
/// arrives, then drain and wait out the quiescence delay.
///
/// Returns `Ok(())` only when serving stopped cleanly.
pub async fn run(config: ServerConfig, shutdown: Shutdown) -> Result<(), LifecycleError> {
    run_tracked(config, shutdown, PhaseLog::new()).await
}

/// [`run`], recording every phase into `phases`.
pub async fn run_tracked(
    config: ServerConfig,
    shutdown: Shutdown,
    phases: PhaseLog,
) -> Result<(), LifecycleError> {
    phases.enter(Phase::Init);
    config.validate()?;
    let cache = RouteCache::new();

    phases.enter(Phase::LoadingConfig);
    if let Err(e) = cache.reload_from(&config.route_file) {
        tracing::error!(error = %e, "Error reading route list");
        return Err(e.into());
    }
    if let Some(addr) = config.metrics_address {
        metrics::init_metrics(addr)?;
        // The recorder missed the gauge update made by the load.
        metrics::set_route_keys_loaded(cache.get().len());
    }

    let quiescence = config.shutdown_quiescence;
    let server = HttpServer::new(config, AppState::new(cache));

    phases.enter(Phase::Serving);
    let signal_task = tokio::spawn(signals::listen(shutdown.clone()));

    let serving = server.run(shutdown.clone());
    tokio::pin!(serving);
    let result = tokio::select! {
        biased;
        _ = shutdown.wait() => {
            phases.enter(Phase::ShuttingDown);
            serving.await
        }
        // Serving ended without a stop request: the listener failed.
        res = &mut serving => res,
    };
    signal_task.abort();

    if let Err(e) = &result {
        tracing::error!(error = %e, "HTTP server error");
    }

    tracing::debug!(quiescence_ms = quiescence.as_millis() as u64, "Waiting before exit");
    tokio::time::sleep(quiescence).await;
    phases.enter(Phase::Stopped);

    result.map_err(LifecycleError::from)
}
