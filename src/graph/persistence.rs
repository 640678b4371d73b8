//! Snapshot persistence for the social graph.
//!
//! A snapshot is a bincode-encoded, versioned list of account records.
//! Restoring replays them through the same two-pass build as the JSON
//! loader, so a restored graph is validated like any other.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::builder::build_from_records;
use super::engine::SocialGraph;
use super::types::AccountRecord;
use crate::error::{CivixError, Result};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct GraphSnapshot {
    version: u32,
    accounts: Vec<AccountRecord>,
}

impl SocialGraph {
    /// Encode the whole graph.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        let snapshot = GraphSnapshot {
            version: SNAPSHOT_VERSION,
            accounts: self.to_records(),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Decode a graph produced by [`snapshot`](Self::snapshot).
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let snapshot: GraphSnapshot = bincode::deserialize(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CivixError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        build_from_records(&snapshot.accounts)
            .map_err(|e| CivixError::Snapshot(format!("corrupt snapshot: {}", e)))
    }

    /// Write a snapshot to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.snapshot()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), bytes = bytes.len(), "graph saved");
        Ok(())
    }

    /// Read a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let graph = Self::restore(&bytes)?;
        debug!(path = %path.display(), accounts = graph.len(), "graph loaded");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> SocialGraph {
        let mut graph = SocialGraph::new();
        graph.add_account("Alice", "MotDePasse12345").unwrap();
        graph.add_account("bob", "SecurePass45678").unwrap();
        graph.add_account("Clara", "TestPass78901").unwrap();
        graph.add_follows("Alice", ["bob", "Clara", "Alice"]).unwrap();
        graph.add_follow("bob", "Alice").unwrap();
        graph
    }

    #[test]
    fn test_round_trip_preserves_render() {
        let graph = sample();
        let restored = SocialGraph::restore(&graph.snapshot().unwrap()).unwrap();
        assert_eq!(restored.render(), graph.render());
        assert_eq!(restored.stats(), graph.stats());
        assert_eq!(
            restored.lookup("clara").unwrap().credential(),
            "TestPass78901"
        );
    }

    #[test]
    fn test_round_trip_empty() {
        let graph = SocialGraph::new();
        let restored = SocialGraph::restore(&graph.snapshot().unwrap()).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("network.bin");

        let graph = sample();
        graph.save(&path).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let loaded = SocialGraph::load(&path).unwrap();
        assert_eq!(loaded.render(), graph.render());
    }

    #[test]
    fn test_restore_garbage() {
        let err = SocialGraph::restore(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, CivixError::Snapshot(_)));
    }

    #[test]
    fn test_restore_wrong_version() {
        let bytes = bincode::serialize(&GraphSnapshot {
            version: 99,
            accounts: Vec::new(),
        })
        .unwrap();
        let err = SocialGraph::restore(&bytes).unwrap_err();
        assert!(matches!(err, CivixError::Snapshot(msg) if msg.contains("99")));
    }

    #[test]
    fn test_restore_rejects_invalid_records() {
        let bytes = bincode::serialize(&GraphSnapshot {
            version: SNAPSHOT_VERSION,
            accounts: vec![AccountRecord {
                name: "alice".to_string(),
                credential: "nodigits".to_string(),
                follows: Vec::new(),
            }],
        })
        .unwrap();
        assert!(matches!(
            SocialGraph::restore(&bytes),
            Err(CivixError::Snapshot(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SocialGraph::load(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, CivixError::Io(_)));
    }
}
