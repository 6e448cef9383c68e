//! Event planning tools: event_plan_event, event_get_venue_suggestions

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::synthesis::{CategoryTable, LEGACY_ROW_LIMIT, TableRenderer, title_case};
use eventcrew_domain::{SheetRead, ToolCall, ToolDefinition, ToolParameter};
use std::fmt::Write;

/// Tool name constants
pub const PLAN_EVENT: &str = "event_plan_event";
pub const GET_VENUE_SUGGESTIONS: &str = "event_get_venue_suggestions";

const VENUES: CategoryTable = CategoryTable::new(
    &[
        (
            &["conference"],
            &["Convention Center", "Hotel Conference Room", "University Auditorium"],
        ),
        (
            &["party"],
            &["Community Center", "Restaurant Private Room", "Outdoor Pavilion"],
        ),
        (
            &["meeting"],
            &["Office Conference Room", "Library Meeting Room", "Coworking Space"],
        ),
        (
            &["cultural"],
            &["Cultural Center", "Museum Event Space", "Art Gallery"],
        ),
    ],
    &["Community Center", "Hotel Meeting Room"],
);

/// Plans an event, optionally pulling attendee or logistics rows from a sheet.
pub struct PlanEvent;

#[async_trait]
impl ToolHandler for PlanEvent {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            PLAN_EVENT,
            "Plan an event with specified details, optionally reading from Google Sheets",
        )
        .with_parameter(ToolParameter::new("event_name", "Name of the event to plan", true))
        .with_parameter(ToolParameter::new("theme", "Theme for the event", false).with_default(""))
        .with_parameter(
            ToolParameter::new("organization", "Organization hosting the event", false)
                .with_default(""),
        )
        .with_parameter(
            ToolParameter::new("requirements", "Special requirements or considerations", false)
                .with_default(""),
        )
        .with_parameter(
            ToolParameter::new(
                "google_sheet_id",
                "Google Sheets ID to read event data from",
                false,
            )
            .with_default(""),
        )
        .with_parameter(
            ToolParameter::new(
                "sheet_range",
                "Range in the sheet to read (e.g., 'Sheet1!A1:D10')",
                false,
            )
            .with_default(""),
        )
    }

    async fn handle(&self, call: &ToolCall, ctx: &ToolContext) -> String {
        let event_name = call.string_or("event_name", "");
        let theme = call.string_or("theme", "");
        let organization = call.string_or("organization", "");
        let requirements = call.string_or("requirements", "");
        let sheet_id = call.string_or("google_sheet_id", "");
        let sheet_range = call.string_or("sheet_range", "");

        let mut response = format!("Event Coordinator: Planning event '{}'", event_name);
        if !theme.is_empty() {
            let _ = write!(response, " with theme '{}'", theme);
        }
        if !organization.is_empty() {
            let _ = write!(response, " for {}", organization);
        }
        response.push('.');
        if !requirements.is_empty() {
            let _ = write!(response, " Requirements: {}", requirements);
        }

        if !sheet_id.is_empty() && !sheet_range.is_empty() {
            match ctx.fetcher.read_rows(sheet_id, sheet_range).await {
                SheetRead::Rows(table) => {
                    let _ = write!(
                        response,
                        "\n\n📊 Google Sheets Data Retrieved ({} rows):\n",
                        table.len()
                    );
                    response.push_str(&TableRenderer::new(LEGACY_ROW_LIMIT).render(&table));
                }
                SheetRead::Empty => {
                    let _ = write!(
                        response,
                        "\n⚠️ No data found in Google Sheet range '{}'",
                        sheet_range
                    );
                }
                SheetRead::Failed(e) => {
                    let _ = write!(response, "\n❌ Error reading Google Sheet: {}", e);
                }
            }
        }

        response
    }
}

pub struct VenueSuggestions;

#[async_trait]
impl ToolHandler for VenueSuggestions {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(GET_VENUE_SUGGESTIONS, "Get venue suggestions for an event")
            .with_parameter(ToolParameter::new(
                "event_type",
                "Type of event (conference, party, meeting, etc.)",
                true,
            ))
            .with_parameter(
                ToolParameter::new("capacity", "Expected number of attendees", false)
                    .with_type("integer")
                    .with_default(50),
            )
            .with_parameter(
                ToolParameter::new("location", "Preferred location or area", false)
                    .with_default(""),
            )
            .with_parameter(
                ToolParameter::new("budget_range", "Budget range (low, medium, high)", false)
                    .with_default("medium"),
            )
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        let event_type = call.string_or("event_type", "");
        let capacity = call.i64_or("capacity", 50);
        let location = call.string_or("location", "");
        let budget = title_case(call.string_or("budget_range", "medium"));

        let mut response = format!(
            "Event Venue Suggestions for {} ({} people):\n\n",
            event_type, capacity
        );
        for (i, venue) in VENUES.lookup(event_type).iter().enumerate() {
            let _ = writeln!(response, "{}. {}", i + 1, venue);
            let _ = writeln!(response, "   Capacity: Suitable for {} attendees", capacity);
            let _ = writeln!(response, "   Budget: {} range", budget);
            if !location.is_empty() {
                let _ = writeln!(response, "   Location: Near {}", location);
            }
            response.push('\n');
        }

        response
    }
}
