//! Domain router: scopes a [`ToolSpec`] down to what an agent may call.

use super::entities::{ToolDefinition, ToolSpec};
use super::pattern::DomainPattern;

/// Resolves domain patterns against a tool spec.
///
/// A tool is selected when **any** pattern matches its name. An empty pattern
/// list selects nothing, and patterns matching no tool are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainRouter;

impl DomainRouter {
    /// Matching definitions, in name order.
    pub fn resolve<'a>(spec: &'a ToolSpec, patterns: &[DomainPattern]) -> Vec<&'a ToolDefinition> {
        if patterns.is_empty() {
            return Vec::new();
        }
        spec.all()
            .filter(|tool| patterns.iter().any(|p| p.matches(&tool.name)))
            .collect()
    }

    /// Same as [`resolve`](Self::resolve), packaged as a spec for handing to an agent.
    pub fn resolve_spec(spec: &ToolSpec, patterns: &[DomainPattern]) -> ToolSpec {
        Self::resolve(spec, patterns).into_iter().cloned().collect()
    }

    /// Patterns that selected no tool at all; useful for configuration warnings.
    pub fn unmatched<'p>(spec: &ToolSpec, patterns: &'p [DomainPattern]) -> Vec<&'p DomainPattern> {
        patterns
            .iter()
            .filter(|p| !spec.names().any(|name| p.matches(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ToolSpec {
        [
            "ask_user_input",
            "db_query",
            "event_get_venue_suggestions",
            "event_plan_event",
            "file_read",
            "fundraising_calculate_budget",
            "fundraising_create_plan",
            "quality_check_deliverable",
            "quality_create_checklist",
            "sheets_explore_structure",
            "sheets_list_available",
            "sheets_read_data",
        ]
        .into_iter()
        .map(|name| ToolDefinition::new(name, "test"))
        .collect()
    }

    fn names(tools: &[&ToolDefinition]) -> Vec<String> {
        tools.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_prefix_selects_exactly_names_with_prefix() {
        let spec = spec();
        for prefix in ["event_", "sheets_", "quality_", "fundraising_", "nope_"] {
            let resolved = DomainRouter::resolve(&spec, &[DomainPattern::parse(prefix)]);
            let expected: Vec<String> = spec
                .names()
                .filter(|n| n.starts_with(prefix))
                .map(String::from)
                .collect();
            assert_eq!(names(&resolved), expected, "prefix {prefix}");
        }
    }

    #[test]
    fn test_wildcard_selects_names_starting_with_stem() {
        let spec = spec();
        let resolved = DomainRouter::resolve(&spec, &[DomainPattern::parse("quality*")]);
        assert_eq!(
            names(&resolved),
            vec!["quality_check_deliverable", "quality_create_checklist"]
        );
    }

    #[test]
    fn test_empty_patterns_resolve_to_nothing() {
        assert!(DomainRouter::resolve(&spec(), &[]).is_empty());
    }

    #[test]
    fn test_star_resolves_everything() {
        let spec = spec();
        let resolved = DomainRouter::resolve(&spec, &[DomainPattern::parse("*")]);
        assert_eq!(resolved.len(), spec.len());
    }

    #[test]
    fn test_patterns_are_or_combined_and_unmatched_ignored() {
        let spec = spec();
        let patterns = DomainPattern::parse_all(["ask_user_input", "event_", "calendar_", "event_"]);
        let resolved = DomainRouter::resolve(&spec, &patterns);
        assert_eq!(
            names(&resolved),
            vec![
                "ask_user_input",
                "event_get_venue_suggestions",
                "event_plan_event"
            ]
        );

        let unmatched = DomainRouter::unmatched(&spec, &patterns);
        assert_eq!(unmatched, vec![&DomainPattern::parse("calendar_")]);
    }

    #[test]
    fn test_resolve_spec_keeps_definitions() {
        let spec = spec();
        let scoped = DomainRouter::resolve_spec(&spec, &[DomainPattern::parse("db_query")]);
        assert_eq!(scoped.len(), 1);
        assert!(scoped.contains("db_query"));
    }
}
