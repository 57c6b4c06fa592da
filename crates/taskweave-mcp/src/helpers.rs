//! Formatting helpers for tool responses.

use taskweave_context::Context;
use taskweave_intent::{Intent, SynthesizedCommand, TASK_LIST_HEADING, normalize};

// ============================================================================
// Eisenhower Matrix
// ============================================================================

/// One cell of the urgent/important matrix.
pub struct Quadrant {
    pub title: &'static str,
    pub advice: &'static str,
    pub filter: &'static [&'static str],
}

/// Important = high priority, urgent = due within three days.
pub const QUADRANTS: [Quadrant; 4] = [
    Quadrant {
        title: "Do first",
        advice: "urgent and important",
        filter: &["priority:H", "due.before:3d"],
    },
    Quadrant {
        title: "Schedule",
        advice: "important, not urgent",
        filter: &["priority:H", "(", "due.none:", "or", "due.after:3d", ")"],
    },
    Quadrant {
        title: "Delegate",
        advice: "urgent, not important",
        filter: &["priority.not:H", "due.before:3d"],
    },
    Quadrant {
        title: "Eliminate",
        advice: "neither urgent nor important",
        filter: &["priority.not:H", "(", "due.none:", "or", "due.after:3d", ")"],
    },
];

impl Quadrant {
    /// `list` command for this quadrant, scoped to `ctx`.
    pub fn command(&self, ctx: &Context) -> SynthesizedCommand {
        let mut args: Vec<String> = self.filter.iter().map(|s| s.to_string()).collect();
        args.extend(ctx.scope_filter());
        SynthesizedCommand::new("list", args)
    }
}

/// Task rows from a report, without the listing heading.
pub fn quadrant_body(raw: &str) -> String {
    let normalized = normalize(raw, Intent::List);
    match normalized.strip_prefix(TASK_LIST_HEADING) {
        Some(rows) => rows.trim().to_string(),
        None => "(none)".to_string(),
    }
}

pub fn format_quadrant(quadrant: &Quadrant, body: &str) -> String {
    format!("## {} ({})\n{}", quadrant.title, quadrant.advice, body)
}

// ============================================================================
// Location Summary
// ============================================================================

/// Human-readable "where am I" report.
pub fn format_location(ctx: &Context, tickets: &[String], ticket_tasks: &[String]) -> String {
    let or_none = |value: Option<String>| value.unwrap_or_else(|| "(none)".to_string());

    let mut lines = vec![
        format!("Project: {}", or_none(ctx.current_project.clone())),
        format!("Ticket: {}", or_none(ctx.current_ticket.clone())),
        format!(
            "Workspace: {}",
            or_none(ctx.workspace_path.as_ref().map(|p| p.display().to_string()))
        ),
        format!(
            "Tickets dir: {}",
            or_none(ctx.tickets_path.as_ref().map(|p| p.display().to_string()))
        ),
        format!(
            "Task scope: {}",
            ctx.scope_filter().unwrap_or_else(|| "(unscoped)".to_string())
        ),
    ];

    if !tickets.is_empty() {
        lines.push(format!("Known tickets: {}", tickets.join(", ")));
    }

    if let Some(ticket) = &ctx.current_ticket {
        if ticket_tasks.is_empty() {
            lines.push(format!("No open checklist items for {ticket}."));
        } else {
            lines.push(format!("Open items for {ticket} ({}):", ticket_tasks.len()));
            lines.extend(ticket_tasks.iter().map(|task| format!("  - {task}")));
        }
    }

    lines.join("\n")
}

/// Bulleted ticket task list.
pub fn format_ticket_tasks(ticket: &str, tasks: &[String]) -> String {
    if tasks.is_empty() {
        return format!("No open tasks found for {ticket}.");
    }
    let mut lines = vec![format!("Tasks for {ticket} ({}):", tasks.len())];
    lines.extend(tasks.iter().map(|task| format!("- {task}")));
    lines.join("\n")
}

/// Normalize a `+tag` argument; `None` for blank input.
pub fn tag_arg(tag: &str) -> Option<String> {
    let tag = tag.trim().trim_start_matches('+');
    if tag.is_empty() { None } else { Some(format!("+{tag}")) }
}

/// Canonical priority letter for H/M/L in any case.
pub fn priority_arg(priority: &str) -> Option<&'static str> {
    match priority.trim().to_ascii_uppercase().as_str() {
        "H" | "HIGH" => Some("H"),
        "M" | "MEDIUM" => Some("M"),
        "L" | "LOW" => Some("L"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn quadrant_commands_are_scoped() {
        let ctx = Context {
            current_project: Some("web".to_string()),
            ..Default::default()
        };
        let cmd = QUADRANTS[0].command(&ctx);
        assert_eq!(cmd.to_string(), "list priority:H due.before:3d project:web");

        let cmd = QUADRANTS[3].command(&Context::default());
        assert_eq!(cmd.to_string(), "list priority.not:H ( due.none: or due.after:3d )");
    }

    #[test]
    fn quadrant_body_strips_heading() {
        let raw = "ID Description\n 3 Ship it\n\n1 task\n";
        assert_eq!(quadrant_body(raw), "3 Ship it");
        assert_eq!(quadrant_body("No matches."), "(none)");
    }

    #[test]
    fn location_lists_ticket_items() {
        let ctx = Context {
            current_ticket: Some("WEB-1".to_string()),
            current_project: Some("web".to_string()),
            workspace_path: Some(PathBuf::from("/src/web")),
            tickets_path: Some(PathBuf::from("/src/web/tickets")),
        };
        let out = format_location(&ctx, &["WEB-1".to_string()], &["A".to_string()]);

        assert!(out.contains("Project: web"));
        assert!(out.contains("Ticket: WEB-1"));
        assert!(out.contains("Task scope: project:WEB-1"));
        assert!(out.contains("  - A"));
    }

    #[test]
    fn location_with_empty_context() {
        let out = format_location(&Context::default(), &[], &[]);
        assert!(out.contains("Project: (none)"));
        assert!(out.contains("Task scope: (unscoped)"));
        assert!(!out.contains("Known tickets"));
    }

    #[test]
    fn tags_and_priorities() {
        assert_eq!(tag_arg("+work").as_deref(), Some("+work"));
        assert_eq!(tag_arg(" home ").as_deref(), Some("+home"));
        assert_eq!(tag_arg("+"), None);
        assert_eq!(priority_arg("h"), Some("H"));
        assert_eq!(priority_arg("Low"), Some("L"));
        assert_eq!(priority_arg("urgent"), None);
    }

    #[test]
    fn ticket_task_listing() {
        assert_eq!(format_ticket_tasks("WEB-2", &[]), "No open tasks found for WEB-2.");
        assert_eq!(
            format_ticket_tasks("WEB-2", &["A".to_string(), "B".to_string()]),
            "Tasks for WEB-2 (2):\n- A\n- B"
        );
    }
}
