//! Tool Registry
//!
//! The [`ToolRegistry`] holds every tool handler under its name and
//! implements [`ToolExecutorPort`]. It is built once at start-up and shared
//! by `Arc` between the team run, the tool server and the CLI.
//!
//! # Usage
//!
//! ```ignore
//! use eventcrew_infrastructure::tools::ToolRegistry;
//!
//! let registry = ToolRegistry::builtin(context, "Default response");
//!
//! assert!(registry.has_tool("event_plan_event"));
//!
//! let call = ToolCall::new("db_query").with_arg("query", "SELECT 1");
//! let text = registry.execute(&call).await.into_text();
//! ```
//!
//! # Execution
//!
//! 1. Unknown names fail with `NOT_FOUND` (`Unknown tool: <name>`)
//! 2. Missing required parameters fail with `INVALID_ARGUMENT`
//! 3. Declared defaults are filled in for omitted optional parameters
//! 4. The handler runs; its text is the successful output
//! 5. A handler that panics yields `EXECUTION_FAILED` instead of unwinding
//!    into the caller
//!
//! Arguments the definition does not declare are ignored.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::FutureExt;
use eventcrew_application::ports::tool_executor::ToolExecutorPort;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

use super::{database, event, file, fundraising, quality, sheets, user_input};

/// Name-keyed collection of tool handlers.
pub struct ToolRegistry {
    context: ToolContext,
    handlers: BTreeMap<String, Arc<dyn ToolHandler>>,
    tool_spec: ToolSpec,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    /// Create an empty registry whose handlers will run with `context`.
    pub fn new(context: ToolContext) -> Self {
        Self {
            context,
            handlers: BTreeMap::new(),
            tool_spec: ToolSpec::new(),
            validator: DefaultToolValidator,
        }
    }

    /// Every tool eventcrew ships with.
    ///
    /// `default_answer` is what `ask_user_input` returns when the operator
    /// does not answer in time.
    pub fn builtin(context: ToolContext, default_answer: impl Into<String>) -> Self {
        Self::new(context)
            .register(event::PlanEvent)
            .register(event::VenueSuggestions)
            .register(fundraising::CreatePlan)
            .register(fundraising::CalculateBudget)
            .register(quality::CheckDeliverable)
            .register(quality::CreateChecklist)
            .register(sheets::ReadData)
            .register(sheets::ListAvailable)
            .register(sheets::ExploreStructure)
            .register(database::Query)
            .register(file::Read)
            .register(user_input::AskUserInput::new(default_answer))
    }

    /// Register a handler. A later handler with the same name replaces the earlier one.
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    /// Register a handler (Arc version)
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let definition = handler.definition();
        if self.handlers.contains_key(&definition.name) {
            tracing::warn!(tool = %definition.name, "Replacing already registered tool");
        } else {
            tracing::debug!(tool = %definition.name, "Registered tool");
        }
        self.handlers.insert(definition.name.clone(), handler);
        self.tool_spec = std::mem::take(&mut self.tool_spec).register(definition);
        self
    }

    /// Every definition, ordered by name.
    pub fn list_all(&self) -> Vec<&ToolDefinition> {
        self.tool_spec.all().collect()
    }

    /// Definition by name; `None` when no such tool exists.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec.get(name)
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();

        let (Some(definition), Some(handler)) = (
            self.tool_spec.get(&call.tool_name),
            self.handlers.get(&call.tool_name),
        ) else {
            tracing::debug!(tool = %call.tool_name, "Unknown tool requested");
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        };

        if let Err(e) = self.validator.validate(call, definition) {
            tracing::debug!(tool = %call.tool_name, error = %e, "Rejected tool call");
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        let call = call.clone().with_defaults_from(definition);
        let outcome = AssertUnwindSafe(handler.handle(&call, &self.context))
            .catch_unwind()
            .await;
        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(output) => {
                tracing::debug!(tool = %call.tool_name, elapsed_ms = elapsed, "Tool executed");
                ToolResult::success(&call.tool_name, output).with_duration(elapsed)
            }
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                tracing::error!(tool = %call.tool_name, "Tool handler panicked: {}", reason);
                ToolResult::failure(
                    &call.tool_name,
                    ToolError::execution_failed(format!(
                        "Tool {} failed: {}",
                        call.tool_name, reason
                    )),
                )
                .with_duration(elapsed)
            }
        }
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("handler panicked")
}
