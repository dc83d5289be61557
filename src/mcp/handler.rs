use crate::error::GceError;
use crate::server::GceServer;
use crate::tools::compute::{list_instances, ListInstancesInput};
use serde_json::json;

use super::dto::{McpError, McpRequest, McpResponse, ToolCall, ToolResult};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub async fn handle_request(server: &GceServer, request: McpRequest) -> McpResponse {
    match request.method.as_str() {
        "initialize" => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "serverInfo": {
                    "name": "gce-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            error: None,
        },
        "tools/list" => {
            let tools = server.get_tools();
            McpResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: Some(json!({
                    "tools": tools
                })),
                error: None,
            }
        }
        "tools/call" => {
            if let Some(params) = request.params {
                if let Ok(tool_call) = serde_json::from_value::<ToolCall>(params) {
                    match handle_tool_call(server, tool_call).await {
                        Ok(result) => McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: request.id,
                            result: Some(json!({
                                "content": [
                                    { "type": "text", "text": result.content }
                                ]
                            })),
                            error: None,
                        },
                        Err(e) => McpResponse {
                            jsonrpc: "2.0".to_string(),
                            id: request.id,
                            result: None,
                            error: Some(McpError {
                                code: e.rpc_code(),
                                message: e.to_string(),
                                data: None,
                            }),
                        },
                    }
                } else {
                    invalid_params(request.id, "Invalid tool call parameters")
                }
            } else {
                invalid_params(request.id, "Missing parameters")
            }
        }
        _ => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(McpError {
                code: -32601,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        },
    }
}

pub(crate) async fn handle_tool_call(
    server: &GceServer,
    tool_call: ToolCall,
) -> Result<ToolResult, GceError> {
    tracing::info!("Handling tool call: {}", tool_call.name);
    let result = match tool_call.name.as_str() {
        "list_instances" => {
            let input: ListInstancesInput = match serde_json::from_value(tool_call.arguments) {
                Ok(v) => v,
                Err(_) => return Err(GceError::invalid_params("Invalid arguments")),
            };
            // Validated before the client is ever touched.
            if input.project.trim().is_empty() || input.zone.trim().is_empty() {
                return Err(GceError::invalid_params(
                    "Both 'project' and 'zone' are required",
                ));
            }
            let output = list_instances(server.compute().await?, input).await?;
            serde_json::to_value(output)?
        }
        _ => return Err(GceError::UnknownTool(tool_call.name)),
    };

    // Text content only: clients of this gateway do not take structured
    // results in the envelope, so the payload is embedded as a string.
    Ok(ToolResult {
        content: serde_json::to_string_pretty(&result)?,
    })
}

/// Fixed response for bodies that never made it through the JSON decoder.
pub fn parse_error_response() -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id: None,
        result: None,
        error: Some(McpError {
            code: -32700,
            message: "Parse error".to_string(),
            data: None,
        }),
    }
}

fn invalid_params(id: Option<serde_json::Value>, message: &str) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(McpError {
            code: -32602,
            message: message.to_string(),
            data: None,
        }),
    }
}
