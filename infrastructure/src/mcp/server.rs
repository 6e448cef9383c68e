//! Transport-independent JSON-RPC dispatch.

use super::protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, RpcError, SERVER_NAME,
    ToolDescriptor,
};
use eventcrew_application::{ToolExecutorPort, ToolSchemaPort};
use eventcrew_domain::ToolCall;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

/// Serves the registry's tools to JSON-RPC clients.
#[derive(Clone)]
pub struct McpServer {
    tools: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
}

impl McpServer {
    pub fn new(tools: Arc<dyn ToolExecutorPort>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self { tools, schema }
    }

    /// Handle one message as received off the wire; bytes that are not
    /// UTF-8 get a `PARSE_ERROR` like any other unparseable message.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<JsonRpcResponse> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.handle_text(text).await,
            Err(e) => {
                debug!("Message is not UTF-8: {}", e);
                Some(JsonRpcResponse::error(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        }
    }

    /// Handle one raw message; `None` when nothing should be sent back.
    pub async fn handle_text(&self, text: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                debug!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };
        self.handle_value(value).await
    }

    pub async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id.unwrap_or(Value::Null),
                RpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
            )),
        }
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!("Notification: {}", request.method);
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::result(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self) -> Value {
        info!("Client initialized");
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<ToolDescriptor> = self
            .schema
            .all_tools_schema(self.tools.tool_spec())
            .iter()
            .filter_map(ToolDescriptor::from_api_tool)
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| RpcError::new(INVALID_PARAMS, "tools/call needs params"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
            })?;

        info!("tools/call {}", params.name);
        let call = ToolCall::new(&params.name).with_arguments(params.arguments.into_iter().collect());
        let result = self.tools.execute(&call).await;
        let is_error = !result.is_success();

        serde_json::to_value(CallToolResult::text(result.into_text(), is_error))
            .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::context;
    use crate::tools::{JsonSchemaToolConverter, ToolRegistry};

    fn server() -> McpServer {
        McpServer::new(
            Arc::new(ToolRegistry::builtin(context(), "Default response")),
            Arc::new(JsonSchemaToolConverter),
        )
    }

    async fn roundtrip(server: &McpServer, message: Value) -> Value {
        let response = server.handle_value(message).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_and_ping() {
        let server = server();
        let init = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;
        assert_eq!(init["id"], 1);
        assert_eq!(init["result"]["serverInfo"]["name"], "eventcrew");
        assert_eq!(init["result"]["protocolVersion"], PROTOCOL_VERSION);

        let ping = roundtrip(&server, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
        assert_eq!(ping, json!({"jsonrpc": "2.0", "id": "p", "result": {}}));
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let response = server()
            .handle_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let list = roundtrip(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let tools = list["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 12);
        assert_eq!(tools[0]["name"], "ask_user_input");

        let budget = tools
            .iter()
            .find(|t| t["name"] == "fundraising_calculate_budget")
            .unwrap();
        assert_eq!(budget["inputSchema"]["type"], "object");
        assert!(
            budget["inputSchema"]["required"]
                .as_array()
                .unwrap()
                .contains(&json!("venue_cost"))
        );
    }

    #[tokio::test]
    async fn test_tools_call() {
        let response = roundtrip(
            &server(),
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {"name": "fundraising_calculate_budget",
                           "arguments": {"venue_cost": 1000, "catering_cost": 500}}
            }),
        )
        .await;

        assert_eq!(response["result"]["isError"], false);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("$1,650.00"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_tool_error() {
        let response = roundtrip(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "weather_forecast"}}),
        )
        .await;

        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Unknown tool"));
        assert!(text.contains("weather_forecast"));
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = server();

        let missing = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call"})).await;
        assert_eq!(missing["error"]["code"], INVALID_PARAMS);

        let unknown = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 6, "method": "resources/list"})).await;
        assert_eq!(unknown["error"]["code"], METHOD_NOT_FOUND);

        let bad = serde_json::to_value(server.handle_text("{not json").await.unwrap()).unwrap();
        assert_eq!(bad["error"]["code"], PARSE_ERROR);
        assert_eq!(bad["id"], Value::Null);

        let no_method = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 7})).await;
        assert_eq!(no_method["error"]["code"], INVALID_REQUEST);
        assert_eq!(no_method["id"], 7);
    }
}
