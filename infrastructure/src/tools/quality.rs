//! Quality assurance tools: quality_check_deliverable, quality_create_checklist

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::synthesis::{CategoryTable, render_bullets, render_checklist, title_case};
use eventcrew_domain::{ToolCall, ToolDefinition, ToolParameter};
use std::fmt::Write;

/// Tool name constants
pub const CHECK_DELIVERABLE: &str = "quality_check_deliverable";
pub const CREATE_CHECKLIST: &str = "quality_create_checklist";

const DELIVERABLE_CHECKS: CategoryTable = CategoryTable::new(
    &[
        (
            &["document", "plan", "proposal"],
            &[
                "Content accuracy and completeness",
                "Grammar and spelling",
                "Formatting and presentation",
                "Adherence to guidelines",
                "Clarity and readability",
            ],
        ),
        (
            &["event", "activity"],
            &[
                "Schedule feasibility",
                "Resource availability",
                "Safety considerations",
                "Accessibility compliance",
                "Backup plans",
            ],
        ),
    ],
    &[
        "Meets requirements",
        "Quality standards",
        "Functionality",
        "User experience",
        "Risk assessment",
    ],
);

const PROJECT_CHECKLISTS: CategoryTable = CategoryTable::new(
    &[
        (
            &["event"],
            &[
                "Venue confirmed and accessible",
                "Catering arranged with dietary options",
                "Audio/visual equipment tested",
                "Registration system working",
                "Emergency procedures in place",
                "Staff briefed on responsibilities",
                "Backup plans documented",
            ],
        ),
        (
            &["document"],
            &[
                "Content reviewed for accuracy",
                "Grammar and spelling checked",
                "Formatting consistent",
                "All references verified",
                "Version control maintained",
                "Approval signatures obtained",
                "Distribution list confirmed",
            ],
        ),
        (
            &["marketing"],
            &[
                "Target audience defined",
                "Messaging consistent across channels",
                "Visual design approved",
                "Contact information verified",
                "Legal compliance checked",
                "Performance metrics defined",
                "Launch timeline confirmed",
            ],
        ),
    ],
    &[
        "Requirements clearly defined",
        "Quality standards established",
        "Testing procedures completed",
        "Stakeholder approval obtained",
        "Documentation updated",
        "Risk assessment completed",
    ],
);

const CHECKLIST_INSTRUCTIONS: &[&str] = &[
    "Check off each item as completed",
    "Document any issues or exceptions",
    "Obtain stakeholder sign-off before proceeding",
];

const CHECKBOX: &str = "☐ ";

pub struct CheckDeliverable;

#[async_trait]
impl ToolHandler for CheckDeliverable {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(CHECK_DELIVERABLE, "Perform quality assurance checks on deliverables")
            .with_parameter(ToolParameter::new("item", "Item or deliverable to check", true))
            .with_parameter(
                ToolParameter::new(
                    "category",
                    "Category of the item (document, event, material, etc.)",
                    false,
                )
                .with_default(""),
            )
            .with_parameter(
                ToolParameter::new("criteria", "Specific criteria to check against", false)
                    .with_default(""),
            )
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        let item = call.string_or("item", "");
        let category = call.string_or("category", "");
        let criteria = call.string_or("criteria", "");

        let mut response = format!("Quality Checker: Reviewing '{}'", item);
        if !category.is_empty() {
            let _ = write!(response, " in category '{}'", category);
        }
        response.push_str(" for quality assurance.\n\n");

        response.push_str("✅ Quality Checklist:\n");
        response.push_str(&render_checklist(DELIVERABLE_CHECKS.lookup(category), ""));

        if !criteria.is_empty() {
            let _ = writeln!(response, "\n🎯 Specific Criteria: {}", criteria);
        }

        response.push_str("\n📋 Status: Under Review\n");
        response.push_str("⏱️  Estimated completion: Pending detailed review\n");
        response
    }
}

pub struct CreateChecklist;

#[async_trait]
impl ToolHandler for CreateChecklist {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            CREATE_CHECKLIST,
            "Create a quality assurance checklist for a project type",
        )
        .with_parameter(ToolParameter::new(
            "project_type",
            "Type of project (event, document, marketing, etc.)",
            true,
        ))
        .with_parameter(
            ToolParameter::new(
                "specific_requirements",
                "Additional requirements to include",
                false,
            )
            .with_default(""),
        )
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        let project_type = call.string_or("project_type", "");
        let extra = call.string_or("specific_requirements", "");

        let mut response = format!(
            "📋 Quality Checklist for {} Project:\n\n",
            title_case(project_type)
        );
        response.push_str(&render_checklist(
            PROJECT_CHECKLISTS.lookup(project_type),
            CHECKBOX,
        ));

        if !extra.is_empty() {
            response.push_str("\n🎯 Additional Requirements:\n");
            let _ = writeln!(response, "{}{}", CHECKBOX, extra);
        }

        response.push_str("\n💡 Instructions:\n");
        response.push_str(&render_bullets(CHECKLIST_INSTRUCTIONS));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::context;

    #[tokio::test]
    async fn test_check_document_category() {
        let call = ToolCall::new(CHECK_DELIVERABLE)
            .with_arg("item", "Sponsor letter")
            .with_arg("category", "Proposal")
            .with_arg("criteria", "Under one page");
        let out = CheckDeliverable.handle(&call, &context()).await;

        assert!(out.starts_with(
            "Quality Checker: Reviewing 'Sponsor letter' in category 'Proposal' for quality assurance.\n\n✅ Quality Checklist:\n1. Content accuracy and completeness\n"
        ));
        assert!(out.contains("5. Clarity and readability\n\n🎯 Specific Criteria: Under one page\n"));
        assert!(out.ends_with(
            "\n📋 Status: Under Review\n⏱️  Estimated completion: Pending detailed review\n"
        ));
    }

    #[tokio::test]
    async fn test_check_without_category_uses_fallback() {
        let call = ToolCall::new(CHECK_DELIVERABLE).with_arg("item", "Flyer");
        let out = CheckDeliverable.handle(&call, &context()).await;
        assert!(out.starts_with("Quality Checker: Reviewing 'Flyer' for quality assurance.\n\n"));
        assert!(out.contains("1. Meets requirements\n"));
        assert!(!out.contains("Specific Criteria"));
    }

    #[tokio::test]
    async fn test_checklist_known_type() {
        let call = ToolCall::new(CREATE_CHECKLIST)
            .with_arg("project_type", "EVENT")
            .with_arg("specific_requirements", "Halal catering");
        let out = CreateChecklist.handle(&call, &context()).await;

        assert!(out.starts_with(
            "📋 Quality Checklist for Event Project:\n\n☐ 1. Venue confirmed and accessible\n"
        ));
        assert!(out.contains("☐ 7. Backup plans documented\n"));
        assert!(out.contains("\n🎯 Additional Requirements:\n☐ Halal catering\n"));
        assert!(out.ends_with("- Obtain stakeholder sign-off before proceeding\n"));
    }

    #[tokio::test]
    async fn test_checklist_fallback() {
        let call = ToolCall::new(CREATE_CHECKLIST).with_arg("project_type", "raffle");
        let out = CreateChecklist.handle(&call, &context()).await;
        assert!(out.starts_with("📋 Quality Checklist for Raffle Project:\n\n☐ 1. Requirements clearly defined\n"));
        assert!(out.contains("☐ 6. Risk assessment completed\n\n💡 Instructions:\n"));
    }
}
