//! Configuration schema definitions.
//!
//! Defines the route list document shape, the server settings, and the
//! environment lookups that decide where the route list lives.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ConfigError;

/// Route list location used when no override is set.
pub const DEFAULT_ROUTE_LIST_FILE_PATH: &str = "/etc/config/route-list.json";

/// Environment variable overriding the route list location.
pub const ROUTE_LIST_FILE_PATH_ENV: &str = "ROUTE_LIST_FILE_PATH";

/// Environment variable selecting the log verbosity.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(30);
pub const DEFAULT_SHUTDOWN_QUIESCENCE: Duration = Duration::from_secs(5);

/// Resolve the route list path from the process environment.
pub fn route_file_path() -> PathBuf {
    route_file_path_from(|key| std::env::var_os(key))
}

/// Resolve the route list path with an injected environment lookup.
///
/// A variable that is set but empty is returned as-is; only an unset
/// variable falls back to [`DEFAULT_ROUTE_LIST_FILE_PATH`].
pub fn route_file_path_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(ROUTE_LIST_FILE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROUTE_LIST_FILE_PATH))
}

/// The set of route keys served by `GET /`.
///
/// Order is preserved from the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteList {
    #[serde(rename = "route-keys", default, deserialize_with = "null_as_empty")]
    keys: Vec<String>,
}

impl RouteList {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// All route keys in document order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }
}

impl From<Vec<String>> for RouteList {
    fn from(keys: Vec<String>) -> Self {
        Self::new(keys)
    }
}

impl<S: Into<String>> FromIterator<S> for RouteList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// HTTP server and lifecycle settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,

    /// Port to bind.
    pub port: u16,

    /// Route list file loaded at startup.
    pub route_file: PathBuf,

    /// How long in-flight requests may run once shutdown starts.
    pub shutdown_grace: Duration,

    /// Extra delay after the HTTP server has stopped.
    pub shutdown_quiescence: Duration,

    /// Prometheus exporter address (disabled when `None`).
    pub metrics_address: Option<SocketAddr>,
}

impl ServerConfig {
    /// Address the HTTP listener binds to.
    pub fn listen_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shutdown_grace.is_zero() {
            return Err(ConfigError::Invalid(
                "shutdown grace period must be greater than zero".to_string(),
            ));
        }
        if let Some(metrics) = self.metrics_address {
            if metrics.port() != 0 && metrics.port() == self.port {
                return Err(ConfigError::Invalid(format!(
                    "metrics address {} collides with the HTTP port",
                    metrics
                )));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            route_file: PathBuf::from(DEFAULT_ROUTE_LIST_FILE_PATH),
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            shutdown_quiescence: DEFAULT_SHUTDOWN_QUIESCENCE,
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_file_path_prefers_override() {
        let path = route_file_path_from(|key| {
            assert_eq!(key, ROUTE_LIST_FILE_PATH_ENV);
            Some(OsString::from("/tmp/routes.json"))
        });
        assert_eq!(path, PathBuf::from("/tmp/routes.json"));
    }

    #[test]
    fn test_route_file_path_falls_back_to_default() {
        let path = route_file_path_from(|_| None);
        assert_eq!(path, PathBuf::from(DEFAULT_ROUTE_LIST_FILE_PATH));
    }

    #[test]
    fn test_route_file_path_keeps_empty_override() {
        let path = route_file_path_from(|_| Some(OsString::new()));
        assert_eq!(path, PathBuf::new());
    }

    #[test]
    fn test_route_list_deserialize() {
        let list: RouteList = serde_json::from_str(r#"{"route-keys": ["x", "y"]}"#).unwrap();
        assert_eq!(list.keys(), ["x", "y"]);

        let missing: RouteList = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(missing.is_empty());

        let null: RouteList = serde_json::from_str(r#"{"route-keys": null}"#).unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_route_list_rejects_wrong_types() {
        assert!(serde_json::from_str::<RouteList>(r#"{"route-keys": [1, 2]}"#).is_err());
        assert!(serde_json::from_str::<RouteList>(r#"{"route-keys": "a"}"#).is_err());
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_address().to_string(), "0.0.0.0:8081");
        assert_eq!(config.shutdown_grace, Duration::from_secs(30));
        assert_eq!(config.shutdown_quiescence, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_config_validation() {
        let config = ServerConfig {
            shutdown_grace: Duration::ZERO,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ServerConfig {
            metrics_address: Some("127.0.0.1:8081".parse().unwrap()),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
