//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Separator between a tool's domain and its action (`event_plan_event`).
pub const TOOL_NAME_SEPARATOR: char = '_';

/// Definition of a tool that can be offered to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "event_plan_event")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint ("string", "number", "integer", "boolean")
    pub param_type: String,
    /// Value used when an optional parameter is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// The domain part of the name (`event` for `event_plan_event`).
    pub fn domain(&self) -> &str {
        self.name
            .split_once(TOOL_NAME_SEPARATOR)
            .map(|(domain, _)| domain)
            .unwrap_or(&self.name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            default: None,
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Immutable, name-ordered collection of tool definitions
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl FromIterator<ToolDefinition> for ToolSpec {
    fn from_iter<I: IntoIterator<Item = ToolDefinition>>(iter: I) -> Self {
        iter.into_iter().fold(ToolSpec::new(), ToolSpec::register)
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
    /// Provider-assigned id used to correlate the result (OpenAI `tool_call_id`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: HashMap<String, Value>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_native_id(mut self, id: impl Into<String>) -> Self {
        self.native_id = Some(id.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// String argument, or `default` when absent or not a string.
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }

    /// Numeric argument. LLMs regularly send numbers as strings, so `"1500"`
    /// is accepted as well as `1500`.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.arguments.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_f64(key).unwrap_or(default)
    }

    /// Get an optional i64 argument (whole numbers only)
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.arguments.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.get_i64(key).unwrap_or(default)
    }

    /// Fill omitted optional parameters with their declared defaults.
    ///
    /// Arguments that the definition does not declare are left untouched.
    pub fn with_defaults_from(mut self, definition: &ToolDefinition) -> Self {
        for param in &definition.parameters {
            if let Some(default) = &param.default {
                self.arguments
                    .entry(param.name.clone())
                    .or_insert_with(|| default.clone());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("event_plan_event", "Plan an event")
            .with_parameter(ToolParameter::new("event_name", "Name of the event", true))
            .with_parameter(ToolParameter::new("theme", "Theme", false).with_default(""));

        assert_eq!(tool.name, "event_plan_event");
        assert_eq!(tool.domain(), "event");
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
        assert!(tool.parameter("theme").is_some());
    }

    #[test]
    fn test_domain_without_separator() {
        let tool = ToolDefinition::new("ping", "Ping");
        assert_eq!(tool.domain(), "ping");
    }

    #[test]
    fn test_tool_spec_is_name_ordered() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("quality_create_checklist", "q"))
            .register(ToolDefinition::new("event_plan_event", "e"))
            .register(ToolDefinition::new("fundraising_create_plan", "f"));

        let names: Vec<&str> = spec.names().collect();
        assert_eq!(
            names,
            vec!["event_plan_event", "fundraising_create_plan", "quality_create_checklist"]
        );
        assert!(spec.get("unknown").is_none());
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new("fundraising_calculate_budget")
            .with_arg("venue_cost", 1000)
            .with_arg("catering_cost", "500.5")
            .with_arg("note", "x");

        assert_eq!(call.get_f64("venue_cost"), Some(1000.0));
        assert_eq!(call.get_f64("catering_cost"), Some(500.5));
        assert_eq!(call.get_f64("note"), None);
        assert_eq!(call.f64_or("materials_cost", 0.0), 0.0);
        assert_eq!(call.string_or("note", "-"), "x");
        assert_eq!(call.string_or("missing", "-"), "-");
    }

    #[test]
    fn test_defaults_fill_only_missing_arguments() {
        let definition = ToolDefinition::new("event_get_venue_suggestions", "Venues")
            .with_parameter(ToolParameter::new("event_type", "Type", true))
            .with_parameter(
                ToolParameter::new("capacity", "Attendees", false)
                    .with_type("integer")
                    .with_default(50),
            )
            .with_parameter(
                ToolParameter::new("budget_range", "Budget", false).with_default("medium"),
            );

        let call = ToolCall::new("event_get_venue_suggestions")
            .with_arg("event_type", "party")
            .with_arg("budget_range", "high")
            .with_defaults_from(&definition);

        assert_eq!(call.get_i64("capacity"), Some(50));
        assert_eq!(call.get_string("budget_range"), Some("high"));
        assert_eq!(call.arguments.get("event_type"), Some(&json!("party")));
    }
}
