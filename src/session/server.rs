//! Session JSON-RPC 2.0 server. Reads requests line by line and writes
//! one response line per request.
//!
//! Logging goes to stderr through `tracing` so it never mixes with
//! the protocol stream.

use std::io::{self, BufRead, Write};

use tracing::{debug, error, info, warn};

use super::handlers;
use super::types::*;
use super::SharedGraph;
use crate::graph::PropagationEngine;

/// Serve requests from stdin to stdout until stdin closes.
pub fn serve(graph: SharedGraph, engine: PropagationEngine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    run(graph, engine, stdin.lock(), &mut stdout)
}

/// Run the request loop over any line source and sink.
///
/// Requests without an `id` are notifications: they are executed but
/// get no response.
pub fn run<R: BufRead, W: Write>(
    graph: SharedGraph,
    engine: PropagationEngine,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    info!(max_depth = engine.max_depth(), "session starting");

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!(request = %trimmed, "received request");

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                let response = JsonRpcResponse::failure(
                    None,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                );
                write_response(output, &response)?;
                continue;
            }
        };

        if let Some(response) = handle_request(&graph, &engine, request) {
            write_response(output, &response)?;
        }
    }

    info!("session shutting down");
    Ok(())
}

fn handle_request(
    graph: &SharedGraph,
    engine: &PropagationEngine,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    let outcome = handlers::dispatch(graph, engine, &request.method, &request.params);

    if let Err(e) = &outcome {
        warn!(method = %request.method, code = e.code, error = %e.message, "request failed");
    }

    let id = request.id?;
    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(Some(id), result),
        Err(e) => JsonRpcResponse::failure(Some(id), e),
    })
}

fn write_response(output: &mut impl Write, response: &JsonRpcResponse) -> io::Result<()> {
    let json = serde_json::to_string(response)?;
    debug!(response = %json, "sending response");
    writeln!(output, "{}", json)?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SocialGraph;
    use serde_json::Value;
    use std::sync::{Arc, RwLock};

    fn session(input: &str) -> (SharedGraph, Vec<Value>) {
        let mut graph = SocialGraph::new();
        graph.add_account("Alice", "MotDePasse12345").unwrap();
        graph.add_account("Bob", "SecurePass45678").unwrap();
        let graph = Arc::new(RwLock::new(graph));

        let mut output = Vec::new();
        run(
            Arc::clone(&graph),
            PropagationEngine::default(),
            input.as_bytes(),
            &mut output,
        )
        .unwrap();

        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (graph, responses)
    }

    #[test]
    fn test_requests_share_one_graph() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"follow","params":{"follower":"Alice","followees":["Bob"]}}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"propagate","params":{"name":"Alice"}}"#,
            "\n",
        );
        let (graph, responses) = session(input);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["result"]["affected"][0], "Bob");
        assert!(graph.read().unwrap().follows("Alice", "Bob").unwrap());
    }

    #[test]
    fn test_parse_error_keeps_loop_alive() {
        let input = "not json\n{\"id\":7,\"method\":\"ping\"}\n";
        let (_, responses) = session(input);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["id"], 7);
        assert!(responses[1]["result"].is_object());
    }

    #[test]
    fn test_notification_gets_no_response() {
        let input = r#"{"method":"follow","params":{"follower":"Bob","followees":["Alice"]}}"#;
        let (graph, responses) = session(input);

        assert!(responses.is_empty());
        assert!(graph.read().unwrap().follows("Bob", "Alice").unwrap());
    }

    #[test]
    fn test_error_response() {
        let input = r#"{"id":"x","method":"lookup","params":{"name":"Ghost"}}"#;
        let (_, responses) = session(input);

        assert_eq!(responses[0]["id"], "x");
        assert_eq!(responses[0]["error"]["code"], GRAPH_ERROR);
        assert_eq!(responses[0]["error"]["data"]["kind"], "not_found");
    }
}
