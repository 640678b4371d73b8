//! # CivixNet
//!
//! A small social graph of accounts and one-directional follows, used
//! to simulate how misinformation spreads.
//!
//! ## Key Features
//!
//! - **Case-insensitive identity**: `"Alice"` and `"alice"` are the same account
//! - **Bounded propagation**: spread reaches at most two hops by default
//! - **Deterministic output**: results are deduplicated and sorted descending
//! - **Persistent**: JSON import and binary snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use civixnet::SocialGraph;
//!
//! let mut graph = SocialGraph::new();
//! graph.add_account("Alice", "MotDePasse12345")?;
//! graph.add_account("Bob", "SecurePass45678")?;
//! graph.add_follow("Alice", "Bob")?;
//!
//! let reached: Vec<&str> = graph.propagate("alice")?.iter().map(|a| a.name()).collect();
//! assert_eq!(reached, ["Bob", "Alice"]);
//! # Ok::<(), civixnet::CivixError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod session;

// Re-exports for convenience
pub use error::{CivixError, Result};

// Graph re-exports
pub use graph::{
    build_from_records, load_json, load_json_str, Account, AccountRecord, GraphStats, NameKey,
    PropagationEngine, PropagationReport, SocialGraph, DEFAULT_MAX_DEPTH, MAX_NAME_LEN,
};
