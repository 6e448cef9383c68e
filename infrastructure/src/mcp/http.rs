//! JSON-RPC over HTTP: `POST /mcp` with one message per request body.

use super::error::McpError;
use super::server::McpServer;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub const MCP_PATH: &str = "/mcp";

impl McpServer {
    pub fn router(self) -> Router {
        Router::new()
            .route(MCP_PATH, post(handle_post))
            .with_state(self)
    }

    /// Serve on `host:port` until `cancel` fires.
    pub async fn serve_http(
        self,
        host: &str,
        port: u16,
        cancel: CancellationToken,
    ) -> Result<(), McpError> {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| McpError::Bind {
                addr: addr.clone(),
                source,
            })?;
        info!("Tool server listening on http://{}{}", addr, MCP_PATH);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await?;
        info!("Tool server stopped");
        Ok(())
    }
}

async fn handle_post(State(server): State<McpServer>, body: Bytes) -> Response {
    match server.handle_bytes(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::context;
    use crate::mcp::protocol::PARSE_ERROR;
    use crate::tools::{JsonSchemaToolConverter, ToolRegistry};
    use serde_json::Value;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_post_over_loopback() {
        let server = McpServer::new(
            Arc::new(ToolRegistry::builtin(context(), "Default response")),
            Arc::new(JsonSchemaToolConverter),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        let handle = tokio::spawn(async move {
            axum::serve(listener, server.router())
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        });

        let client = reqwest::Client::new();
        let url = format!("http://{}{}", addr, MCP_PATH);
        let response: Value = client
            .post(&url)
            .json(&serde_json::json!({"jsonrpc": "2.0", "id": 9, "method": "ping"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(response["id"], 9);

        let status = client
            .post(&url)
            .json(&serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .send()
            .await
            .unwrap()
            .status();
        assert_eq!(status, reqwest::StatusCode::ACCEPTED);

        let garbled = client
            .post(&url)
            .header("content-type", "text/plain")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(garbled.status(), reqwest::StatusCode::OK);
        let garbled: Value = garbled.json().await.unwrap();
        assert_eq!(garbled["error"]["code"], PARSE_ERROR);
        assert_eq!(garbled["id"], Value::Null);

        cancel.cancel();
        handle.await.unwrap().unwrap();
    }
}
