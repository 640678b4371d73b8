//! Social graph module, the core of CivixNet.
//!
//! Provides the account model, the follow graph engine, bounded
//! propagation, text rendering, JSON loading and snapshot persistence.

pub mod builder;
pub mod engine;
pub mod persistence;
pub mod propagation;
pub mod render;
pub mod types;

pub use builder::{build_from_records, load_json, load_json_str};
pub use engine::SocialGraph;
pub use propagation::{PropagationEngine, PropagationReport, DEFAULT_MAX_DEPTH};
pub use types::{Account, AccountRecord, GraphStats, NameKey, MAX_NAME_LEN};
