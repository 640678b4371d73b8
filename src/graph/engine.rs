//! The core graph engine for CivixNet.
//!
//! Accounts live in a petgraph arena; follow edges point between node
//! indexes. A `BTreeMap` keyed by the case-insensitive `NameKey` gives
//! both name lookup and ascending iteration order.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::BTreeMap;
use tracing::debug;

use super::types::*;
use crate::error::{CivixError, Result};

/// The follow graph: every account and who it follows.
#[derive(Debug, Clone)]
pub struct SocialGraph {
    /// Arena of accounts. An edge `a -> b` means "a follows b".
    graph: DiGraph<Account, ()>,
    /// Index: case-insensitive name -> node index, in ascending name order.
    index: BTreeMap<NameKey, NodeIndex>,
}

impl SocialGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: BTreeMap::new(),
        }
    }

    // ─── Account Operations ─────────────────────────────────────

    /// Validate and insert a new account with an empty follow-set.
    ///
    /// Names are unique case-insensitively: re-adding `"alice"` when
    /// `"Alice"` exists fails with [`CivixError::AlreadyExists`].
    pub fn add_account(&mut self, name: &str, credential: &str) -> Result<&Account> {
        let account = Account::new(name, credential)?;
        let key = account.key();
        if let Some(&existing) = self.index.get(&key) {
            return Err(CivixError::AlreadyExists(
                self.graph[existing].name().to_string(),
            ));
        }
        let idx = self.graph.add_node(account);
        self.index.insert(key, idx);
        debug!(account = name, "account added");
        Ok(&self.graph[idx])
    }

    /// Find an account by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Result<&Account> {
        self.resolve(name).map(|idx| &self.graph[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&NameKey::new(name))
    }

    /// Replace an account's credential. The old one is kept on failure.
    pub fn set_credential(&mut self, name: &str, credential: &str) -> Result<()> {
        let idx = self.resolve(name)?;
        self.graph[idx].set_credential(credential)
    }

    /// All accounts in ascending case-insensitive name order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.index.values().map(move |&idx| &self.graph[idx])
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Make `follower` follow `followee`. Adding an existing edge is a no-op.
    pub fn add_follow(&mut self, follower: &str, followee: &str) -> Result<()> {
        let from = self.resolve(follower)?;
        let to = self.resolve(followee)?;
        self.graph.update_edge(from, to, ());
        debug!(follower, followee, "follow added");
        Ok(())
    }

    /// Remove the edge if present. Returns whether an edge was removed.
    pub fn remove_follow(&mut self, follower: &str, followee: &str) -> Result<bool> {
        let from = self.resolve(follower)?;
        let to = self.resolve(followee)?;
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                debug!(follower, followee, "follow removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply [`add_follow`](Self::add_follow) to each followee in order.
    ///
    /// Stops at the first failure; edges added before it are kept.
    pub fn add_follows<I, S>(&mut self, follower: &str, followees: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for followee in followees {
            self.add_follow(follower, followee.as_ref())?;
        }
        Ok(())
    }

    /// Apply [`remove_follow`](Self::remove_follow) to each followee in order.
    ///
    /// Stops at the first failure; edges removed before it stay removed.
    pub fn remove_follows<I, S>(&mut self, follower: &str, followees: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for followee in followees {
            self.remove_follow(follower, followee.as_ref())?;
        }
        Ok(())
    }

    // ─── Query Operations ───────────────────────────────────────

    /// Whether `follower` follows `followee`.
    pub fn follows(&self, follower: &str, followee: &str) -> Result<bool> {
        let from = self.resolve(follower)?;
        let to = self.resolve(followee)?;
        Ok(self.graph.contains_edge(from, to))
    }

    /// True iff `a` follows `b` and `b` follows `a`.
    ///
    /// Fails with [`CivixError::NotFound`] if either name is unknown.
    pub fn mutual_follow(&self, a: &str, b: &str) -> Result<bool> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.graph.contains_edge(a, b) && self.graph.contains_edge(b, a))
    }

    /// Accounts `name` follows, ascending by name.
    pub fn followees(&self, name: &str) -> Result<Vec<&Account>> {
        let idx = self.resolve(name)?;
        Ok(self
            .followee_indexes(idx)
            .into_iter()
            .map(|n| &self.graph[n])
            .collect())
    }

    /// Accounts following `name`, ascending by name.
    pub fn followers(&self, name: &str) -> Result<Vec<&Account>> {
        let idx = self.resolve(name)?;
        let mut followers: Vec<&Account> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| &self.graph[n])
            .collect();
        followers.sort();
        Ok(followers)
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        let mutual_pairs = self
            .graph
            .edge_references()
            .filter(|e| e.source() < e.target())
            .filter(|e| self.graph.contains_edge(e.target(), e.source()))
            .count();

        GraphStats {
            account_count: self.graph.node_count(),
            follow_count: self.graph.edge_count(),
            mutual_pairs,
        }
    }

    /// Every account with its followees, ascending by name.
    pub fn to_records(&self) -> Vec<AccountRecord> {
        self.account_indexes()
            .map(|idx| {
                let account = &self.graph[idx];
                AccountRecord {
                    name: account.name().to_string(),
                    credential: account.credential().to_string(),
                    follows: self
                        .followee_indexes(idx)
                        .into_iter()
                        .map(|n| self.graph[n].name().to_string())
                        .collect(),
                }
            })
            .collect()
    }

    // ─── Internals ──────────────────────────────────────────────

    pub(crate) fn resolve(&self, name: &str) -> Result<NodeIndex> {
        self.index
            .get(&NameKey::new(name))
            .copied()
            .ok_or_else(|| CivixError::NotFound(name.to_string()))
    }

    /// Node indexes in ascending name order.
    pub(crate) fn account_indexes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.index.values().copied()
    }

    pub(crate) fn account_at(&self, idx: NodeIndex) -> &Account {
        &self.graph[idx]
    }

    /// Outgoing neighbours in the graph's iteration order: ascending by name.
    pub(crate) fn followee_indexes(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut followees: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        followees.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        followees
    }
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}
