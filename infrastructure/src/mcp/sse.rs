//! JSON-RPC over server-sent events.
//!
//! `GET /sse` opens a session stream. Its first `endpoint` event names the
//! URL to `POST` messages to (`/messages?session_id=N`); each response is
//! pushed back on the stream as a `message` event, and the POST itself
//! only gets `202 Accepted`.

use super::error::McpError;
use super::protocol::JsonRpcResponse;
use super::server::McpServer;
use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const SSE_PATH: &str = "/sse";
pub const MESSAGES_PATH: &str = "/messages";

/// Responses a session may queue before a slow reader holds up its POSTs.
const SESSION_BUFFER: usize = 32;

#[derive(Clone)]
struct SseState {
    server: McpServer,
    sessions: Arc<Mutex<HashMap<u64, mpsc::Sender<JsonRpcResponse>>>>,
    next_session: Arc<AtomicU64>,
    cancel: CancellationToken,
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: u64,
}

impl McpServer {
    /// Routes for the SSE transport; open streams end when `cancel` fires.
    pub fn sse_router(self, cancel: CancellationToken) -> Router {
        let state = SseState {
            server: self,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_session: Arc::new(AtomicU64::new(0)),
            cancel,
        };
        Router::new()
            .route(SSE_PATH, get(open_stream))
            .route(MESSAGES_PATH, post(post_message))
            .with_state(state)
    }

    /// Serve SSE sessions on `host:port` until `cancel` fires.
    pub async fn serve_sse(
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
        info!("Tool server listening on http://{}{}", addr, SSE_PATH);

        let shutdown = cancel.clone();
        axum::serve(listener, self.sse_router(cancel))
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;
        info!("Tool server stopped");
        Ok(())
    }
}

async fn open_stream(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let id = state.next_session.fetch_add(1, Ordering::Relaxed);
    let (tx, rx) = mpsc::channel(SESSION_BUFFER);
    state.sessions.lock().await.insert(id, tx);
    debug!(session = id, "SSE session opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?session_id={}", MESSAGES_PATH, id));
    let messages = ReceiverStream::new(rx)
        .map(|response| Event::default().event("message").json_data(response));
    let cancel = state.cancel.clone();

    let events = stream::once(async move { Ok(endpoint) })
        .chain(messages)
        .take_until(async move { cancel.cancelled().await });
    Sse::new(events).keep_alive(KeepAlive::default())
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<SessionQuery>,
    body: Bytes,
) -> Response {
    let Some(sender) = state.sessions.lock().await.get(&query.session_id).cloned() else {
        return (StatusCode::NOT_FOUND, "Unknown session").into_response();
    };

    if let Some(response) = state.server.handle_bytes(&body).await
        && sender.send(response).await.is_err()
    {
        debug!(session = query.session_id, "SSE session closed by client");
        state.sessions.lock().await.remove(&query.session_id);
        return (StatusCode::GONE, "Session closed").into_response();
    }
    StatusCode::ACCEPTED.into_response()
}
