//! Simulated database tool: db_query

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::{ToolCall, ToolDefinition, ToolParameter};

pub const QUERY: &str = "db_query";

/// Echoes the query back; no database is attached.
pub struct Query;

#[async_trait]
impl ToolHandler for Query {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(QUERY, "Execute a database query (simulated)")
            .with_parameter(ToolParameter::new("query", "SQL query to execute", true))
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        format!(
            "Database: Executed query '{}' - Results would appear here in a real implementation.",
            call.string_or("query", "")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::context;

    #[tokio::test]
    async fn test_query_is_echoed() {
        let call = ToolCall::new(QUERY).with_arg("query", "SELECT * FROM donors");
        assert_eq!(
            Query.handle(&call, &context()).await,
            "Database: Executed query 'SELECT * FROM donors' - Results would appear here in a real implementation."
        );
    }
}
