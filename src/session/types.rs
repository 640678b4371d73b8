//! Session protocol types: JSON-RPC 2.0 message structures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── JSON-RPC 2.0 Base Types ────────────────────────────────────

pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
/// Application-level failure: the graph rejected the operation.
pub const GRAPH_ERROR: i64 = -32000;

/// An incoming JSON-RPC request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// An outgoing JSON-RPC response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl JsonRpcError {
    pub fn new(code: i64, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }
}

// ─── Method Params ──────────────────────────────────────────────

/// `lookup` params.
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: String,
}

/// `add_account` params.
#[derive(Debug, Deserialize)]
pub struct AccountParams {
    pub name: String,
    pub credential: String,
}

/// `follow` / `unfollow` params.
#[derive(Debug, Deserialize)]
pub struct FollowParams {
    pub follower: String,
    pub followees: Vec<String>,
}

/// `mutual` params.
#[derive(Debug, Deserialize)]
pub struct PairParams {
    pub a: String,
    pub b: String,
}

/// `propagate` params. Without `depth` the session default applies.
#[derive(Debug, Deserialize)]
pub struct PropagateParams {
    pub name: String,
    #[serde(default)]
    pub depth: Option<usize>,
}
