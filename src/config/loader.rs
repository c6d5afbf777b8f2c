//! Route list loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::schema::RouteList;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no route list file found with path {}", path.display())]
    NotFound { path: PathBuf },

    #[error("error trying to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error trying to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load the route list from a JSON file.
///
/// The document is expected to look like `{"route-keys": ["a", "b"]}`.
/// A `null` document is treated as an empty list.
pub fn load_route_list(path: &Path) -> Result<RouteList, ConfigError> {
    if let Err(e) = fs::metadata(path) {
        if e.kind() == ErrorKind::NotFound {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let content = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let list: Option<RouteList> =
        serde_json::from_slice(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let list = list.unwrap_or_default();
    tracing::debug!(path = %path.display(), route_keys = list.len(), "Route list parsed");
    Ok(list)
}
