//! Tool handler contract
//!
//! A handler implements one named tool. Dependencies reach it through an
//! explicit [`ToolContext`] rather than captured state, so the same handler
//! value serves every agent and every server request.

use crate::ports::user_input::UserInputPort;
use crate::services::data_fetcher::DataFetcher;
use async_trait::async_trait;
use eventcrew_domain::{ToolCall, ToolDefinition};
use std::sync::Arc;

/// Collaborators available to every handler.
#[derive(Clone)]
pub struct ToolContext {
    pub fetcher: Arc<DataFetcher>,
    pub input: Arc<dyn UserInputPort>,
}

impl ToolContext {
    pub fn new(fetcher: Arc<DataFetcher>, input: Arc<dyn UserInputPort>) -> Self {
        Self { fetcher, input }
    }
}

/// One tool: its definition plus the code that renders its answer.
///
/// `handle` receives a call whose required arguments have been checked and
/// whose omitted optional arguments carry their declared defaults. It always
/// produces text; failures of external reads are rendered inline.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn handle(&self, call: &ToolCall, ctx: &ToolContext) -> String;
}
