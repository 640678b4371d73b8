//! CivixNet CLI.
//!
//! Usage:
//!   civixnet load network.json     # Build graph from JSON and save it
//!   civixnet show                  # Print the graph
//!   civixnet follow alice bob      # alice now follows bob
//!   civixnet mutual alice bob      # Do they follow each other?
//!   civixnet propagate alice       # Who does alice's rumour reach?
//!   civixnet serve                 # JSON-RPC over stdin/stdout

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use civixnet::cli::{Cli, Commands};
use civixnet::config::{CivixConfig, DATA_DIR};
use civixnet::{load_json, session, PropagationEngine, SocialGraph};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let data_dir = root.join(DATA_DIR);
    let config_path = data_dir.join("config.toml");

    // Parse before logging is up, report problems after.
    let loaded = CivixConfig::read(&config_path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => CivixConfig::default(),
    };
    init_tracing(&config.logging.level);
    if let Err(e) = &loaded {
        warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
    }

    let snapshot_path = config.resolve_snapshot_path(&data_dir);
    let mutates = cli.command.mutates();

    let mut graph = match &cli.command {
        Commands::Load { file } => {
            load_json(file).with_context(|| format!("loading {}", file.display()))?
        }
        _ => open_graph(&snapshot_path)?,
    };

    match cli.command {
        Commands::Load { .. } | Commands::Show => {
            print!("{}", graph);
        }

        Commands::Add { name, credential } => {
            let account = graph.add_account(&name, &credential)?;
            println!("added {}", account);
        }

        Commands::Follow {
            follower,
            followees,
        } => {
            graph.add_follows(&follower, &followees)?;
            print_followees(&graph, &follower)?;
        }

        Commands::Unfollow {
            follower,
            followees,
        } => {
            graph.remove_follows(&follower, &followees)?;
            print_followees(&graph, &follower)?;
        }

        Commands::Credential { name, credential } => {
            graph.set_credential(&name, &credential)?;
            println!("credential updated for {}", graph.lookup(&name)?);
        }

        Commands::Mutual { a, b } => {
            let mutual = graph.mutual_follow(&a, &b)?;
            let (a, b) = (graph.lookup(&a)?, graph.lookup(&b)?);
            if mutual {
                println!("{} and {} follow each other", a, b);
            } else {
                println!("{} and {} do not follow each other", a, b);
            }
        }

        Commands::Propagate { name, depth, json } => {
            let engine = depth
                .map(PropagationEngine::new)
                .unwrap_or_else(|| config.engine());
            if json {
                let report = engine.report(&graph, &name)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for account in engine.propagate(&graph, &name)? {
                    println!("{}", account);
                }
            }
        }

        Commands::Stats => {
            println!("{}", serde_json::to_string_pretty(&graph.stats())?);
        }

        Commands::Serve => {
            let shared = Arc::new(RwLock::new(graph));
            session::serve(Arc::clone(&shared), config.engine())?;

            // Save whatever the session changed
            let graph = shared
                .read()
                .map_err(|e| anyhow::anyhow!("graph lock poisoned: {}", e))?;
            graph.save(&snapshot_path)?;
            return Ok(());
        }
    }

    if mutates {
        graph
            .save(&snapshot_path)
            .with_context(|| format!("saving {}", snapshot_path.display()))?;
    }

    Ok(())
}

/// Initialize tracing to stderr; stdout carries command output.
fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

/// Load the saved graph, or start empty if nothing was saved yet.
fn open_graph(snapshot_path: &Path) -> Result<SocialGraph> {
    if snapshot_path.exists() {
        SocialGraph::load(snapshot_path)
            .with_context(|| format!("reading {}", snapshot_path.display()))
    } else {
        info!(path = %snapshot_path.display(), "no saved graph, starting empty");
        Ok(SocialGraph::new())
    }
}

fn print_followees(graph: &SocialGraph, follower: &str) -> Result<()> {
    let names: Vec<&str> = graph
        .followees(follower)?
        .into_iter()
        .map(|a| a.name())
        .collect();
    if names.is_empty() {
        println!("{} suit : aucun", graph.lookup(follower)?);
    } else {
        println!("{} suit : {}", graph.lookup(follower)?, names.join(", "));
    }
    Ok(())
}
