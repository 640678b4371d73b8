//! Session method implementations: maps requests to graph operations.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::{RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::types::*;
use super::SharedGraph;
use crate::error::CivixError;
use crate::graph::{PropagationEngine, SocialGraph};

/// Names of every method the session answers.
pub const METHODS: &[&str] = &[
    "lookup",
    "add_account",
    "follow",
    "unfollow",
    "mutual",
    "propagate",
    "render",
    "stats",
    "ping",
];

/// Run one method against the shared graph.
pub fn dispatch(
    graph: &SharedGraph,
    engine: &PropagationEngine,
    method: &str,
    params: &Value,
) -> Result<Value, JsonRpcError> {
    debug!(method, "dispatching");
    match method {
        "lookup" => {
            let p: NameParams = parse(params)?;
            let guard = read(graph)?;
            let account = guard.lookup(&p.name).map_err(graph_error)?;
            Ok(json!({ "name": account.name() }))
        }

        "add_account" => {
            let p: AccountParams = parse(params)?;
            let mut guard = write(graph)?;
            let account = guard
                .add_account(&p.name, &p.credential)
                .map_err(graph_error)?;
            Ok(json!({ "name": account.name() }))
        }

        "follow" | "unfollow" => {
            let p: FollowParams = parse(params)?;
            let mut guard = write(graph)?;
            let outcome = if method == "follow" {
                guard.add_follows(&p.follower, &p.followees)
            } else {
                guard.remove_follows(&p.follower, &p.followees)
            };
            outcome.map_err(graph_error)?;
            let following: Vec<&str> = guard
                .followees(&p.follower)
                .map_err(graph_error)?
                .into_iter()
                .map(|a| a.name())
                .collect();
            Ok(json!({ "follower": p.follower, "following": following }))
        }

        "mutual" => {
            let p: PairParams = parse(params)?;
            let guard = read(graph)?;
            let mutual = guard.mutual_follow(&p.a, &p.b).map_err(graph_error)?;
            Ok(json!({ "mutual": mutual }))
        }

        "propagate" => {
            let p: PropagateParams = parse(params)?;
            let engine = p.depth.map(PropagationEngine::new).unwrap_or(*engine);
            let guard = read(graph)?;
            let report = engine.report(&guard, &p.name).map_err(graph_error)?;
            to_value(&report)
        }

        "render" => {
            let guard = read(graph)?;
            Ok(json!({ "text": guard.render() }))
        }

        "stats" => {
            let guard = read(graph)?;
            to_value(&guard.stats())
        }

        "ping" => Ok(Value::Object(Default::default())),

        _ => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )),
    }
}

fn parse<T: DeserializeOwned>(params: &Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.clone())
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))
}

fn graph_error(e: CivixError) -> JsonRpcError {
    JsonRpcError {
        code: GRAPH_ERROR,
        message: e.to_string(),
        data: Some(json!({ "kind": e.code() })),
    }
}

fn read(graph: &SharedGraph) -> Result<RwLockReadGuard<'_, SocialGraph>, JsonRpcError> {
    graph
        .read()
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Graph lock error: {}", e)))
}

fn write(graph: &SharedGraph) -> Result<RwLockWriteGuard<'_, SocialGraph>, JsonRpcError> {
    graph
        .write()
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Graph lock error: {}", e)))
}
