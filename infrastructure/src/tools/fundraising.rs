//! Fundraising tools: fundraising_create_plan, fundraising_calculate_budget

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::synthesis::{format_money, format_percent, render_bullets, render_checklist};
use eventcrew_domain::{ToolCall, ToolDefinition, ToolParameter};
use std::fmt::Write;

/// Tool name constants
pub const CREATE_PLAN: &str = "fundraising_create_plan";
pub const CALCULATE_BUDGET: &str = "fundraising_calculate_budget";

/// Upper bound (exclusive) of the small tier.
const SMALL_TIER: f64 = 1000.0;
/// Upper bound (exclusive) of the medium tier.
const MEDIUM_TIER: f64 = 5000.0;

/// Size bracket of an amount. A value equal to a bound falls in the upper tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Small,
    Medium,
    Large,
}

impl Tier {
    fn of(amount: f64) -> Self {
        if amount < SMALL_TIER {
            Tier::Small
        } else if amount < MEDIUM_TIER {
            Tier::Medium
        } else {
            Tier::Large
        }
    }

    fn strategies(self) -> &'static [&'static str] {
        match self {
            Tier::Small => &["Bake sale", "Small donations", "Ticket sales"],
            Tier::Medium => &["Silent auction", "Corporate sponsorships", "Crowdfunding"],
            Tier::Large => &[
                "Major donor outreach",
                "Grant applications",
                "Premium sponsorships",
            ],
        }
    }

    fn recommendations(self) -> &'static [&'static str] {
        match self {
            Tier::Small => &[
                "Focus on small-scale fundraising activities",
                "Seek local business sponsorships",
            ],
            Tier::Medium => &[
                "Organize multiple fundraising events",
                "Apply for community grants",
            ],
            Tier::Large => &[
                "Seek major corporate sponsorships",
                "Apply for large grants",
                "Consider premium ticket pricing",
            ],
        }
    }
}

const NEXT_STEPS: &[&str] = &[
    "Identify potential donors and sponsors",
    "Create compelling fundraising materials",
    "Set up donation tracking system",
    "Launch fundraising campaign",
];

pub struct CreatePlan;

#[async_trait]
impl ToolHandler for CreatePlan {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(CREATE_PLAN, "Create a comprehensive fundraising plan")
            .with_parameter(ToolParameter::new("goal", "Fundraising goal or purpose", true))
            .with_parameter(
                ToolParameter::new("event_name", "Related event name", false).with_default(""),
            )
            .with_parameter(
                ToolParameter::new("budget_target", "Target amount to raise", false)
                    .with_type("number")
                    .with_default(0),
            )
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        let goal = call.string_or("goal", "");
        let event_name = call.string_or("event_name", "");
        let target = call.f64_or("budget_target", 0.0);

        let mut response = format!("Fundraising Coordinator: Creating plan for '{}'", goal);
        if !event_name.is_empty() {
            let _ = write!(response, " related to {}", event_name);
        }

        if target > 0.0 {
            let _ = write!(response, "\n\n💰 Budget Target: ${}", format_money(target));
            response.push_str("\n\n📋 Recommended Strategies:\n");
            response.push_str(&render_checklist(Tier::of(target).strategies(), ""));
        }

        response.push_str("\n\n📈 Next Steps:\n");
        response.push_str(&render_checklist(NEXT_STEPS, ""));
        response
    }
}

pub struct CalculateBudget;

#[async_trait]
impl ToolHandler for CalculateBudget {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            CALCULATE_BUDGET,
            "Calculate total event budget with breakdown",
        )
        .with_parameter(ToolParameter::new("venue_cost", "Cost of the venue", true).with_type("number"))
        .with_parameter(
            ToolParameter::new("catering_cost", "Cost of catering", true).with_type("number"),
        )
        .with_parameter(
            ToolParameter::new("materials_cost", "Cost of materials and supplies", false)
                .with_type("number")
                .with_default(0),
        )
        .with_parameter(
            ToolParameter::new("marketing_cost", "Cost of marketing and promotion", false)
                .with_type("number")
                .with_default(0),
        )
        .with_parameter(
            ToolParameter::new(
                "contingency_percent",
                "Contingency buffer as a percentage of the subtotal",
                false,
            )
            .with_type("number")
            .with_default(10),
        )
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        let venue = call.f64_or("venue_cost", 0.0);
        let catering = call.f64_or("catering_cost", 0.0);
        let materials = call.f64_or("materials_cost", 0.0);
        let marketing = call.f64_or("marketing_cost", 0.0);
        let percent = call.f64_or("contingency_percent", 10.0);

        let subtotal = venue + catering + materials + marketing;
        let contingency = subtotal * (percent / 100.0);
        let total = subtotal + contingency;

        let line = |label: &str, amount: f64| format!("  {:<16}${:>8}", label, format_money(amount));

        let mut response = String::from("💰 Event Budget Calculation:\n\n");
        response.push_str("📊 Cost Breakdown:\n");
        let _ = writeln!(response, "{}", line("Venue:", venue));
        let _ = writeln!(response, "{}", line("Catering:", catering));
        let _ = writeln!(response, "{}", line("Materials:", materials));
        let _ = writeln!(response, "{}", line("Marketing:", marketing));
        let _ = writeln!(response, "{}", line("Subtotal:", subtotal));
        let _ = writeln!(
            response,
            "{} ({}%)",
            line("Contingency:", contingency),
            format_percent(percent)
        );
        let _ = writeln!(response, "{}\n", line("TOTAL:", total));

        response.push_str("💡 Fundraising Recommendations:\n");
        response.push_str(&render_bullets(Tier::of(total).recommendations()));
        response
    }
}
