//! Minimal MCP server: newline-delimited JSON-RPC 2.0 over stdio.
//!
//! Requests are handled one at a time in arrival order. Only the tool
//! capability is advertised.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::service::SsmService;
use crate::tools::{SsmTool, ToolError, call_tool};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "kira-ssmqc";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

impl Response {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Reads requests until EOF and writes one response line per request.
pub fn serve<R: BufRead, W: Write>(
    service: &SsmService,
    mut reader: R,
    mut writer: W,
) -> std::io::Result<()> {
    tracing::info!(
        "MCP server ready (data dir {})",
        service.data_dir().display()
    );
    let mut buf = String::new();
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(response) = handle_line(service, line) {
            writer.write_all(response.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    tracing::info!("stdin closed; shutting down");
    Ok(())
}

/// Handles one raw message. Notifications produce no output.
pub fn handle_line(service: &SsmService, line: &str) -> Option<String> {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(service, request)?,
        Err(e) => {
            tracing::warn!("unparseable message: {}", e);
            Response::err(Value::Null, PARSE_ERROR, format!("parse error: {e}"))
        }
    };
    match serde_json::to_string(&response) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!("failed to encode response: {}", e);
            None
        }
    }
}

fn handle_request(service: &SsmService, request: Request) -> Option<Response> {
    let Some(id) = request.id else {
        tracing::debug!("notification: {}", request.method);
        return None;
    };
    if request.jsonrpc.as_deref() != Some("2.0") {
        return Some(Response::err(id, INVALID_REQUEST, "jsonrpc must be \"2.0\""));
    }

    let response = match request.method.as_str() {
        "initialize" => Response::ok(id, initialize_result()),
        "ping" => Response::ok(id, json!({})),
        "tools/list" => Response::ok(id, tools_list_result()),
        "tools/call" => match serde_json::from_value::<CallParams>(request.params) {
            Ok(params) => tools_call(service, id, &params),
            Err(e) => Response::err(id, INVALID_PARAMS, format!("invalid params: {e}")),
        },
        other => Response::err(id, METHOD_NOT_FOUND, format!("method not found: {other}")),
    };
    Some(response)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn tools_list_result() -> Value {
    let tools: Vec<Value> = SsmTool::all().iter().map(|t| t.descriptor()).collect();
    json!({ "tools": tools })
}

fn tools_call(service: &SsmService, id: Value, params: &CallParams) -> Response {
    match call_tool(service, &params.name, &params.arguments) {
        Ok(text) => Response::ok(id, tool_result(&text, false)),
        Err(ToolError::UnknownTool(name)) => {
            Response::err(id, INVALID_PARAMS, format!("unknown tool: {name}"))
        }
        Err(e) => {
            tracing::warn!("tool {} failed: {}", params.name, e);
            Response::ok(id, tool_result(&e.to_string(), true))
        }
    }
}

fn tool_result(text: &str, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/server/tests.rs"]
mod tests;
