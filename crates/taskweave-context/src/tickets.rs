//! Ticket directories on disk.
//!
//! A tickets root holds one directory per ticket. Each directory may carry a
//! markdown checklist (`- [ ] text` items) and a free-form notes file whose
//! `TODO:` lines also count as tasks. Nothing here writes to disk.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Checklist file inside a ticket directory.
pub const CHECKLIST_FILE: &str = "checklist.md";

/// Notes file inside a ticket directory.
pub const NOTES_FILE: &str = "context.md";

static UNCHECKED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*]\s+\[ \]\s+(.+)$").expect("checklist regex")
});

static TODO_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"TODO(?::|\s)\s*(.+)").expect("todo regex")
});

/// Unchecked checklist items, in document order.
pub fn parse_checklist(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| UNCHECKED_ITEM.captures(line))
        .filter_map(|caps| non_empty(&caps[1]))
        .collect()
}

/// Text following each `TODO` marker, in document order.
pub fn parse_todo_notes(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| TODO_MARKER.captures(line))
        .filter_map(|caps| non_empty(&caps[1]))
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

/// A ticket name that cannot escape the tickets root.
fn is_plain_name(ticket: &str) -> bool {
    !ticket.is_empty()
        && !ticket.contains('/')
        && !ticket.contains('\\')
        && !ticket.contains("..")
}

/// Read every open task for `ticket` under `tickets_root`.
///
/// Checklist items come first, then TODO notes. Missing directories or files
/// contribute nothing.
pub async fn read_ticket_tasks(tickets_root: &Path, ticket: &str) -> Vec<String> {
    if !is_plain_name(ticket) {
        tracing::debug!(ticket, "rejecting ticket name with path components");
        return Vec::new();
    }

    let dir = tickets_root.join(ticket);
    let mut tasks = Vec::new();

    if let Ok(content) = tokio::fs::read_to_string(dir.join(CHECKLIST_FILE)).await {
        tasks.extend(parse_checklist(&content));
    }
    if let Ok(content) = tokio::fs::read_to_string(dir.join(NOTES_FILE)).await {
        tasks.extend(parse_todo_notes(&content));
    }

    tracing::debug!(ticket, dir = %dir.display(), count = tasks.len(), "read ticket tasks");
    tasks
}

/// Names of ticket directories under `tickets_root` that start with a ticket code.
///
/// Sorted so callers see a stable order regardless of filesystem enumeration.
pub async fn list_ticket_dirs(tickets_root: &Path, ticket_prefix: &Regex) -> Vec<String> {
    let mut entries = match tokio::fs::read_dir(tickets_root).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(root = %tickets_root.display(), error = %e, "tickets root unreadable");
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if ticket_prefix.is_match(&name) {
            names.push(name);
        }
    }

    names.sort();
    names
}
