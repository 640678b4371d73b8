//! CLI module for CivixNet.
//!
//! Commands:
//! - Build: load, add, follow, unfollow, credential
//! - Query: show, mutual, propagate, stats
//! - System: serve

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "civixnet")]
#[command(about = "Social follow graph with bounded misinformation propagation")]
#[command(version)]
pub struct Cli {
    /// Working root; the graph lives in <root>/.civixnet
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ─── Build Commands ─────────────────────────────────────────────
    /// Build the graph from a JSON network file, replacing the saved one
    Load {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Add an account
    Add {
        name: String,
        credential: String,
    },

    /// Make an account follow one or more accounts
    Follow {
        follower: String,
        #[arg(required = true)]
        followees: Vec<String>,
    },

    /// Make an account stop following one or more accounts
    Unfollow {
        follower: String,
        #[arg(required = true)]
        followees: Vec<String>,
    },

    /// Replace an account's credential
    Credential {
        name: String,
        credential: String,
    },

    // ─── Query Commands ─────────────────────────────────────────────
    /// Print every account and who it follows
    Show,

    /// Check whether two accounts follow each other
    Mutual {
        a: String,
        b: String,
    },

    /// List accounts reached by misinformation started by an account
    Propagate {
        /// Origin account
        name: String,

        /// Hops to spread (default from config, normally 2)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show graph statistics
    Stats,

    // ─── System ─────────────────────────────────────────────────────
    /// Answer JSON-RPC requests on stdin until it closes, then save
    Serve,
}

impl Commands {
    /// Whether the command changes the graph and needs saving afterwards.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Load { .. }
                | Commands::Add { .. }
                | Commands::Follow { .. }
                | Commands::Unfollow { .. }
                | Commands::Credential { .. }
        )
    }
}
