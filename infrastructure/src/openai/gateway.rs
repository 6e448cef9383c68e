//! Chat-completions gateway
//!
//! Converts role-tagged [`Message`]s and neutral tool schemas into the
//! OpenAI request shape and parses text and `tool_calls` back into an
//! [`LlmResponse`].

use async_trait::async_trait;
use eventcrew_application::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use eventcrew_domain::{ContentBlock, LlmResponse, Message, Role, StopReason};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAiChatGateway {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    closed: AtomicBool,
}

impl OpenAiChatGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Per-request timeout. Without one, requests wait as long as the server does.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, GatewayError> {
        self.http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request_body(&self, request: &CompletionRequest) -> Value {
        let messages: Vec<Value> = request.messages.iter().map(message_to_json).collect();

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        if !request.tools.is_empty() {
            let tools: Vec<Value> = request.tools.iter().map(schema_to_function).collect();
            body["tools"] = Value::Array(tools);
        }

        body
    }
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

/// Names must match `^[a-zA-Z0-9_-]+$`; anything else is replaced.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn message_to_json(msg: &Message) -> Value {
    let mut message = json!({
        "role": role_str(msg.role),
        "content": msg.content,
    });

    if let Some(name) = &msg.name {
        message["name"] = json!(sanitize_name(name));
    }

    if msg.role == Role::Assistant && !msg.tool_calls.is_empty() {
        let calls: Vec<Value> = msg
            .tool_calls
            .iter()
            .enumerate()
            .map(|(i, call)| {
                let id = call
                    .native_id
                    .clone()
                    .unwrap_or_else(|| format!("call_{}", i));
                json!({
                    "id": id,
                    "type": "function",
                    "function": {
                        "name": call.tool_name,
                        "arguments": Value::Object(
                            call.arguments.clone().into_iter().collect()
                        ).to_string(),
                    }
                })
            })
            .collect();
        message["tool_calls"] = Value::Array(calls);
    }

    if msg.role == Role::Tool
        && let Some(id) = &msg.tool_call_id
    {
        message["tool_call_id"] = json!(id);
    }

    message
}

/// `{name, description, input_schema}` → `{type: function, function: {...}}`
fn schema_to_function(schema: &Value) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": schema["name"],
            "description": schema["description"],
            "parameters": schema["input_schema"],
        }
    })
}

fn parse_response(body: Value) -> Result<LlmResponse, GatewayError> {
    let choice = body
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;
    let message = &choice["message"];

    let mut content = Vec::new();
    if let Some(text) = message.get("content").and_then(Value::as_str)
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text.to_string()));
    }

    if let Some(calls) = message.get("tool_calls").and_then(Value::as_array) {
        for call in calls {
            let id = call["id"].as_str().unwrap_or_default().to_string();
            let name = call["function"]["name"]
                .as_str()
                .ok_or_else(|| GatewayError::InvalidResponse("tool call without name".into()))?
                .to_string();
            let raw = call["function"]["arguments"].as_str().unwrap_or("{}");
            let input: HashMap<String, Value> = if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(raw).map_err(|e| {
                    GatewayError::InvalidResponse(format!(
                        "arguments for '{}' are not a JSON object: {}",
                        name, e
                    ))
                })?
            };
            content.push(ContentBlock::ToolUse { id, name, input });
        }
    }

    let stop_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .map(|reason| match reason {
            "stop" => StopReason::EndTurn,
            "tool_calls" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        });

    Ok(LlmResponse {
        content,
        stop_reason,
        model: body.get("model").and_then(Value::as_str).map(String::from),
    })
}

fn status_error(status: StatusCode, text: String) -> GatewayError {
    let detail = format!("HTTP {}: {}", status, text);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(detail)
        }
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(detail),
    }
}

#[async_trait]
impl LlmGateway for OpenAiChatGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(GatewayError::Closed);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let body = self.to_request_body(&request);
        debug!(
            "POST {} ({} messages, {} tools)",
            url,
            request.messages.len(),
            request.tools.len()
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        parse_response(value)
    }

    async fn close(&self) -> Result<(), GatewayError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventcrew_domain::ToolCall;

    #[test]
    fn test_request_body_shapes_messages_and_tools() {
        let gateway = OpenAiChatGateway::new("sk-test").with_temperature(Some(0.2));
        let request = CompletionRequest::new(vec![
            Message::system("You plan events."),
            Message::user("Plan the gala").named("user"),
            Message::assistant_tool_calls(
                "",
                vec![
                    ToolCall::new("event_plan_event")
                        .with_arg("event_name", "Gala")
                        .with_native_id("call_9"),
                ],
            ),
            Message::tool("call_9", "Event Coordinator: Planning event 'Gala'."),
        ])
        .with_tools(vec![json!({
            "name": "event_plan_event",
            "description": "Plan an event",
            "input_schema": {"type": "object", "properties": {}, "required": []}
        })]);

        let body = gateway.to_request_body(&request);

        assert_eq!(body["model"], "gpt-4o");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["name"], "user");

        let call = &body["messages"][2]["tool_calls"][0];
        assert_eq!(call["id"], "call_9");
        assert_eq!(call["type"], "function");
        assert_eq!(call["function"]["name"], "event_plan_event");
        let args: Value = serde_json::from_str(call["function"]["arguments"].as_str().unwrap()).unwrap();
        assert_eq!(args["event_name"], "Gala");

        assert_eq!(body["messages"][3]["role"], "tool");
        assert_eq!(body["messages"][3]["tool_call_id"], "call_9");

        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "event_plan_event");
        assert_eq!(body["tools"][0]["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_request_without_tools_omits_field() {
        let gateway = OpenAiChatGateway::new("k").with_model("gpt-4o-mini");
        let body = gateway.to_request_body(&CompletionRequest::new(vec![Message::user("hi")]));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert!(body.get("tools").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("event_coordinator"), "event_coordinator");
        assert_eq!(sanitize_name("Quality Checker!"), "Quality_Checker_");
    }

    #[test]
    fn test_parse_text_response() {
        let response = parse_response(json!({
            "model": "gpt-4o-2024-08-06",
            "choices": [{
                "message": {"role": "assistant", "content": "fundraising_coordinator"},
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        assert_eq!(response.text_content(), "fundraising_coordinator");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.model.as_deref(), Some("gpt-4o-2024-08-06"));
    }

    #[test]
    fn test_parse_tool_calls() {
        let response = parse_response(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "fundraising_calculate_budget",
                            "arguments": "{\"venue_cost\": 1000, \"catering_cost\": 500}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].native_id.as_deref(), Some("call_abc"));
        assert_eq!(calls[0].get_f64("venue_cost"), Some(1000.0));
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        let err = parse_response(json!({
            "choices": [{
                "message": {"tool_calls": [{
                    "id": "c", "function": {"name": "db_query", "arguments": "[1,2]"}
                }]}
            }]
        }))
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_without_choices() {
        assert!(matches!(
            parse_response(json!({"error": "x"})),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, String::new()),
            GatewayError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, String::new()),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "slow down".into()),
            GatewayError::RequestFailed(m) if m.contains("slow down")
        ));
    }

    #[tokio::test]
    async fn test_closed_gateway_rejects_requests() {
        let gateway = OpenAiChatGateway::new("k");
        gateway.close().await.unwrap();
        let err = gateway
            .complete(CompletionRequest::new(vec![Message::user("hi")]))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Closed));
    }
}
