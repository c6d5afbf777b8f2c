//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, access log, panic recovery)
//! - Bind the listener and serve until shutdown
//! - Drain in-flight requests for a bounded grace period

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use axum_server::Handle;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::middleware::access_log;
use crate::http::request::MakeRequestUuidV4;
use crate::lifecycle::Shutdown;
use crate::routing::{RouteCache, RouteSelector, UniformRandom};

/// Error type for serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Bind failed, or the listener died while serving.
    #[error("cannot listen on {addr}: {source}")]
    Listen {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// In-flight requests were still running when the grace period ran out.
    #[error("{connections} connection(s) still open after {grace:?} grace period; closed forcibly")]
    GracePeriodElapsed { grace: Duration, connections: usize },
}

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: RouteCache,
    pub selector: Arc<dyn RouteSelector>,
}

impl AppState {
    /// State using uniform random selection.
    pub fn new(cache: RouteCache) -> Self {
        Self {
            cache,
            selector: Arc::new(UniformRandom),
        }
    }

    /// Replace the selection strategy.
    pub fn with_selector(mut self, selector: Arc<dyn RouteSelector>) -> Self {
        self.selector = selector;
        self
    }
}

/// HTTP server for the route key service.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    handle: Handle,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
            config,
            handle: Handle::new(),
        }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route(
                "/healthz",
                get(handlers::healthz)
                    .head(handlers::not_found)
                    .fallback(handlers::not_found),
            )
            .route(
                "/",
                get(handlers::decide)
                    .head(handlers::not_found)
                    .fallback(handlers::not_found),
            )
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(CatchPanicLayer::custom(handlers::panicked))
            .layer(middleware::from_fn(access_log))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Handle for observing the listener (bound address, open connections).
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve until `shutdown` fires, then drain for the configured grace period.
    pub async fn run(self, shutdown: Shutdown) -> Result<(), ServerError> {
        let addr = self.config.listen_address();
        serve_with_grace(self.router, addr, self.handle, shutdown, self.config.shutdown_grace).await
    }
}

/// Serve `app` on `addr` until `shutdown` fires.
///
/// Once triggered, new connections are refused and in-flight requests get
/// `grace` to finish. Connections still open after that are closed and
/// [`ServerError::GracePeriodElapsed`] is returned. The listening socket is
/// released by the time this returns.
pub async fn serve_with_grace(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
    shutdown: Shutdown,
    grace: Duration,
) -> Result<(), ServerError> {
    let listen_err = |source: std::io::Error| ServerError::Listen { addr, source };

    tracing::info!(address = %addr, "HTTP server starting");
    let serve = axum_server::bind(addr)
        .handle(handle.clone())
        .serve(app.into_make_service());
    tokio::pin!(serve);

    tokio::select! {
        res = &mut serve => {
            res.map_err(listen_err)?;
            tracing::info!(address = %addr, "HTTP server stopped");
            return Ok(());
        }
        _ = shutdown.wait() => {}
    }

    tracing::info!(
        address = %addr,
        grace_secs = grace.as_secs_f64(),
        connections = handle.connection_count(),
        "Draining in-flight requests"
    );
    handle.graceful_shutdown(None);

    match tokio::time::timeout(grace, &mut serve).await {
        Ok(res) => {
            res.map_err(listen_err)?;
            tracing::info!(address = %addr, "HTTP server stopped");
            Ok(())
        }
        Err(_) => {
            let connections = handle.connection_count();
            tracing::warn!(
                address = %addr,
                connections,
                "Grace period elapsed, closing remaining connections"
            );
            handle.shutdown();
            serve.await.map_err(listen_err)?;
            Err(ServerError::GracePeriodElapsed { grace, connections })
        }
    }
}
