//! Bounded misinformation propagation.
//!
//! Starting from one account, spread follows outgoing edges level by
//! level up to a fixed depth. Level 0 is the origin, level 1 what it
//! follows, level 2 what those accounts follow.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::engine::SocialGraph;
use super::types::Account;
use crate::error::Result;

/// Default number of hops spread travels from its origin.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Runs bounded-depth propagation over a [`SocialGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationEngine {
    max_depth: usize,
}

/// Serializable outcome of a propagation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationReport {
    pub origin: String,
    pub max_depth: usize,
    /// Affected account names, descending case-insensitive.
    pub affected: Vec<String>,
    /// How many accounts each level newly reached; index 0 is the origin.
    pub reached_per_level: Vec<usize>,
}

impl PropagationEngine {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Accounts reached from `origin` within `max_depth` hops, origin
    /// included, without duplicates, sorted descending by name.
    pub fn propagate<'g>(&self, graph: &'g SocialGraph, origin: &str) -> Result<Vec<&'g Account>> {
        let (affected, _) = self.spread(graph, origin)?;
        Ok(ordered(graph, affected))
    }

    /// Same traversal as [`propagate`](Self::propagate), summarised.
    pub fn report(&self, graph: &SocialGraph, origin: &str) -> Result<PropagationReport> {
        let (affected, reached_per_level) = self.spread(graph, origin)?;
        let origin = graph.lookup(origin)?.name().to_string();
        Ok(PropagationReport {
            origin,
            max_depth: self.max_depth,
            affected: ordered(graph, affected)
                .into_iter()
                .map(|a| a.name().to_string())
                .collect(),
            reached_per_level,
        })
    }

    /// Frontier BFS. Only accounts first reached at the previous level
    /// are expanded, so each account is visited at most once.
    fn spread(
        &self,
        graph: &SocialGraph,
        origin: &str,
    ) -> Result<(HashSet<NodeIndex>, Vec<usize>)> {
        let start = graph.resolve(origin)?;

        let mut affected: HashSet<NodeIndex> = HashSet::new();
        affected.insert(start);
        let mut frontier = vec![start];
        let mut reached_per_level = vec![1];

        for level in 0..self.max_depth {
            let mut next = Vec::new();
            for &idx in &frontier {
                for followee in graph.followee_indexes(idx) {
                    if affected.insert(followee) {
                        next.push(followee);
                    }
                }
            }
            debug!(level = level + 1, reached = next.len(), "propagation level");
            if next.is_empty() {
                break;
            }
            reached_per_level.push(next.len());
            frontier = next;
        }

        debug!(origin, affected = affected.len(), "propagation finished");
        Ok((affected, reached_per_level))
    }
}

impl Default for PropagationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

fn ordered(graph: &SocialGraph, affected: HashSet<NodeIndex>) -> Vec<&Account> {
    let mut accounts: Vec<&Account> = affected.into_iter().map(|i| graph.account_at(i)).collect();
    accounts.sort();
    accounts.reverse();
    accounts
}

impl SocialGraph {
    /// Propagate from `origin` with the default depth of two hops.
    pub fn propagate(&self, origin: &str) -> Result<Vec<&Account>> {
        PropagationEngine::default().propagate(self, origin)
    }
}
