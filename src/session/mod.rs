//! Session server module.
//!
//! Serves newline-delimited JSON-RPC 2.0 requests against one graph
//! shared behind a read-write lock: queries read, mutations write.

pub mod handlers;
pub mod server;
pub mod types;

use std::sync::{Arc, RwLock};

use crate::graph::SocialGraph;

/// A graph shared between a session and whoever owns it.
pub type SharedGraph = Arc<RwLock<SocialGraph>>;

pub use server::{run, serve};
