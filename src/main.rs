//! Route key picker.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request           ┌──────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http::server ──▶ handlers ──▶ routing     │
//!                              │   (request id,      /healthz    cache.rs    │
//!                              │    access log)      /           selector.rs │
//!     Client Response          │                     fallback 404            │
//!     ◀────────────────────────┼── {"decision": "<route key>"}                │
//!                              │                                              │
//!                              │   config (route list file, ServerConfig)     │
//!                              │   lifecycle (startup, signals, shutdown)     │
//!                              │   observability (logging, metrics)           │
//!                              └──────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 0 after a clean stop and 1 on any startup, serving or
//! shutdown error.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use randomise_route_keys::config::schema::DEFAULT_PORT;
use randomise_route_keys::config::{route_file_path, ServerConfig};
use randomise_route_keys::lifecycle::{self, Shutdown};
use randomise_route_keys::observability::logging::{self, LogFormat};

/// Serve a random route key from a JSON route list
#[derive(Parser, Debug)]
#[command(name = "randomise-route-keys", version, about)]
struct Args {
    /// Port used for the server
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// Seconds in-flight requests may take to finish after a stop signal
    #[arg(long, default_value_t = 30)]
    shutdown_grace_secs: u64,

    /// Seconds to wait after the server stopped, before exiting
    #[arg(long, default_value_t = 5)]
    shutdown_quiescence_secs: u64,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    /// Expose Prometheus metrics on this address
    #[arg(long)]
    metrics_address: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(logging::level_from_env(), args.log_format) {
        eprintln!("error setting up the logger: {e}");
        return ExitCode::FAILURE;
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        route_file: route_file_path(),
        shutdown_grace: Duration::from_secs(args.shutdown_grace_secs),
        shutdown_quiescence: Duration::from_secs(args.shutdown_quiescence_secs),
        metrics_address: args.metrics_address,
    };

    tracing::info!(
        release = env!("CARGO_PKG_VERSION"),
        address = %config.listen_address(),
        route_file = %config.route_file.display(),
        shutdown_grace_secs = args.shutdown_grace_secs,
        "randomise-route-keys starting"
    );

    match lifecycle::run(config, Shutdown::new()).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Exiting with failure");
            ExitCode::FAILURE
        }
    }
}
