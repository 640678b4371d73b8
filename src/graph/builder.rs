//! Graph builder: loads a social graph from JSON.
//!
//! Every account is created first, then every follow edge is resolved
//! by name. The first bad record aborts the whole load.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use super::engine::SocialGraph;
use super::types::AccountRecord;
use crate::error::{CivixError, Result};

/// Top-level layout of a network file.
#[derive(Debug, Deserialize)]
struct NetworkFile {
    #[serde(alias = "utilisateurs")]
    accounts: Vec<AccountRecord>,
}

/// Build a graph from a JSON network file on disk.
pub fn load_json(path: &Path) -> Result<SocialGraph> {
    let content = fs::read_to_string(path)
        .map_err(|e| CivixError::Load(format!("cannot read {}: {}", path.display(), e)))?;
    let graph = load_json_str(&content)?;
    info!(
        file = %path.display(),
        accounts = graph.len(),
        "network loaded from JSON"
    );
    Ok(graph)
}

/// Build a graph from JSON text.
pub fn load_json_str(content: &str) -> Result<SocialGraph> {
    let file: NetworkFile = serde_json::from_str(content)
        .map_err(|e| CivixError::Load(format!("malformed network JSON: {}", e)))?;
    build_from_records(&file.accounts)
}

/// Two passes: all accounts, then all edges.
pub fn build_from_records(records: &[AccountRecord]) -> Result<SocialGraph> {
    let mut graph = SocialGraph::new();

    for record in records {
        graph
            .add_account(&record.name, &record.credential)
            .map_err(|e| CivixError::Load(format!("account '{}': {}", record.name, e)))?;
    }

    for record in records {
        graph
            .add_follows(&record.name, &record.follows)
            .map_err(|e| CivixError::Load(format!("follows of '{}': {}", record.name, e)))?;
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NETWORK: &str = r#"{
        "accounts": [
            { "name": "alice", "credential": "Alice123pass", "follows": ["bob", "Clara"] },
            { "name": "bob", "credential": "Bob123pass", "follows": ["alice"] },
            { "name": "clara", "credential": "Clara123pass" }
        ]
    }"#;

    #[test]
    fn test_load_json_str() {
        let graph = load_json_str(NETWORK).unwrap();
        assert_eq!(graph.len(), 3);
        assert!(graph.follows("alice", "clara").unwrap());
        assert!(graph.mutual_follow("alice", "bob").unwrap());
        assert!(graph.followees("clara").unwrap().is_empty());
    }

    #[test]
    fn test_forward_references_resolve() {
        // "alice" follows "zoe", declared after her
        let json = r#"{ "accounts": [
            { "name": "alice", "credential": "Alice123pass", "follows": ["zoe"] },
            { "name": "zoe", "credential": "Zoe123pass", "follows": [] }
        ] }"#;
        let graph = load_json_str(json).unwrap();
        assert!(graph.follows("alice", "zoe").unwrap());
    }

    #[test]
    fn test_original_field_names() {
        let json = r#"{ "utilisateurs": [
            { "username": "alice", "password": "420-SF2_H25_limoilou", "abonnements": ["bob"] },
            { "username": "bob", "password": "420-SF2_H25_limoilou", "abonnements": [] }
        ] }"#;
        // 420-SF2_H25_limoilou has upper, lower and digits
        let graph = load_json_str(json).unwrap();
        assert!(graph.follows("alice", "bob").unwrap());
    }

    #[test]
    fn test_unknown_followee_fails_load() {
        let json = r#"{ "accounts": [
            { "name": "alice", "credential": "Alice123pass", "follows": ["ghost"] }
        ] }"#;
        let err = load_json_str(json).unwrap_err();
        assert!(matches!(err, CivixError::Load(msg) if msg.contains("ghost")));
    }

    #[test]
    fn test_invalid_credential_fails_load() {
        let json = r#"{ "accounts": [
            { "name": "alice", "credential": "weak", "follows": [] }
        ] }"#;
        let err = load_json_str(json).unwrap_err();
        assert!(matches!(err, CivixError::Load(msg) if msg.contains("alice")));
    }

    #[test]
    fn test_duplicate_account_fails_load() {
        let json = r#"{ "accounts": [
            { "name": "alice", "credential": "Alice123pass" },
            { "name": "ALICE", "credential": "Alice123pass" }
        ] }"#;
        assert!(matches!(load_json_str(json), Err(CivixError::Load(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_json_str("{ not json"), Err(CivixError::Load(_))));
        assert!(matches!(load_json_str(r#"{"other": []}"#), Err(CivixError::Load(_))));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(NETWORK.as_bytes()).unwrap();
        let graph = load_json(file.path()).unwrap();
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_json(Path::new("/nonexistent/network.json")).unwrap_err();
        assert!(matches!(err, CivixError::Load(_)));
    }
}
