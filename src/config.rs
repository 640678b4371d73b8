//! Configuration loaded from `<data dir>/config.toml`.
//!
//! ```toml
//! [propagation]
//! max_depth = 2
//!
//! [storage]
//! snapshot_path = "network.bin"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key is optional. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::graph::{PropagationEngine, DEFAULT_MAX_DEPTH};

/// Name of the data directory created under the working root.
pub const DATA_DIR: &str = ".civixnet";

const DEFAULT_SNAPSHOT_FILE: &str = "network.bin";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CivixConfig {
    pub propagation: PropagationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Hops spread travels from its origin.
    pub max_depth: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Snapshot file; relative paths are resolved against the data dir.
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CivixConfig {
    /// Load from `path`, falling back to defaults if the file is missing
    /// or cannot be parsed.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse `path` without falling back. `Ok(None)` when there is no
    /// readable file; a parse failure is returned to the caller.
    pub fn read(path: &Path) -> std::result::Result<Option<Self>, toml::de::Error> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Where the graph snapshot lives for a given data directory.
    pub fn resolve_snapshot_path(&self, data_dir: &Path) -> PathBuf {
        match &self.storage.snapshot_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => data_dir.join(p),
            None => data_dir.join(DEFAULT_SNAPSHOT_FILE),
        }
    }

    pub fn engine(&self) -> PropagationEngine {
        PropagationEngine::new(self.propagation.max_depth)
    }
}
