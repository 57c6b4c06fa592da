//! MCP request types.
//!
//! These types define the argument schemas for the taskweave tools.

use rmcp::schemars;
use serde::Deserialize;

/// Natural-language task request.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TaskQueryRequest {
    /// Free-form request, e.g. "show urgent tasks" or "done with 4"
    #[schemars(description = "Natural-language request, e.g. 'show urgent tasks', 'add write release notes', 'complete 4'")]
    pub query: String,
}

/// Raw taskwarrior command line.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TaskRawRequest {
    #[schemars(description = "Taskwarrior arguments without the leading 'task', e.g. 'project:web list' or 'add \"call bob\" due:tomorrow'")]
    pub command: String,
}

/// Switch taskwarrior context.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TaskContextRequest {
    #[schemars(description = "Context name to activate, 'none' to clear, or 'list' to show defined contexts")]
    pub name: String,
}

/// Structured task creation.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TaskAddRequest {
    #[schemars(description = "Task description")]
    pub description: String,
    /// Overrides the detected project/ticket scope
    #[schemars(description = "Project name (defaults to the detected ticket or project)")]
    pub project: Option<String>,
    #[schemars(description = "Priority: H, M, or L")]
    pub priority: Option<String>,
    #[schemars(description = "Due date in any taskwarrior date form, e.g. 'tomorrow', 'eow', '2025-03-01'")]
    pub due: Option<String>,
    #[schemars(description = "Tags to attach (with or without leading '+')")]
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A ticket reference; omitted means the detected ticket.
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TicketRequest {
    #[schemars(description = "Ticket identifier, e.g. 'PROJ-123' (defaults to the current ticket)")]
    pub ticket: Option<String>,
}

/// Pin the current ticket.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetTicketRequest {
    #[schemars(description = "Ticket identifier, e.g. 'PROJ-123'")]
    pub ticket: String,
}
