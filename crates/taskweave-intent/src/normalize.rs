//! Reshape taskwarrior report output for AI consumption.
//!
//! Report tables carry column headers, rule lines, and a trailing "N tasks"
//! summary that are noise to a model. For listing intents the task rows are
//! pulled out under a fixed heading; anything that doesn't look like a report
//! is returned untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::Intent;

/// First line of a reshaped task listing.
pub const TASK_LIST_HEADING: &str = "Current tasks:";

static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*ID\s").expect("header regex"));

static TASK_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\s+\S").expect("row regex"));

static SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s+tasks?\b").expect("summary regex"));

/// Normalize raw tool output for `intent`.
pub fn normalize(raw: &str, intent: Intent) -> String {
    if !intent.is_listing() {
        return raw.to_string();
    }

    let rows = task_rows(raw);
    if rows.is_empty() {
        return raw.to_string();
    }

    format!("{TASK_LIST_HEADING}\n{}", rows.join("\n"))
}

fn task_rows(raw: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut in_listing = false;

    for line in raw.lines() {
        if HEADER.is_match(line) {
            in_listing = true;
        } else if line.trim().is_empty() {
            in_listing = false;
        } else if in_listing {
            if TASK_ROW.is_match(line) {
                rows.push(line.trim());
            }
        } else if SUMMARY.is_match(line) {
            break;
        }
    }

    rows
}
