//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Verbosity comes from `LOG_LEVEL`: exactly `debug` enables debug,
//!   anything else (including unset) means info

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::LOG_LEVEL_ENV;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Error type for logger setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Map a `LOG_LEVEL` value to a level filter.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    match value {
        Some("debug") => LevelFilter::DEBUG,
        _ => LevelFilter::INFO,
    }
}

/// Level filter derived from the process environment.
pub fn level_from_env() -> LevelFilter {
    level_from(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}

/// Install the global subscriber.
///
/// Fails if a subscriber has already been installed.
pub fn init(level: LevelFilter, format: LogFormat) -> Result<(), LoggingError> {
    let filter = EnvFilter::default().add_directive(level.into());

    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_target(true)
    });
    let pretty = (format == LogFormat::Pretty).then(|| tracing_subscriber::fmt::layer());

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from() {
        assert_eq!(level_from(Some("debug")), LevelFilter::DEBUG);
        assert_eq!(level_from(Some("DEBUG")), LevelFilter::INFO);
        assert_eq!(level_from(Some("warn")), LevelFilter::INFO);
        assert_eq!(level_from(Some("")), LevelFilter::INFO);
        assert_eq!(level_from(None), LevelFilter::INFO);
    }

    #[test]
    fn test_second_init_fails() {
        // Either this call or an earlier one in the process installs the subscriber.
        let _ = init(LevelFilter::INFO, LogFormat::Pretty);
        assert!(matches!(
            init(LevelFilter::INFO, LogFormat::Json),
            Err(LoggingError::Init(_))
        ));
    }
}
