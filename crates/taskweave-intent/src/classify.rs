//! Intent classification.
//!
//! A fixed, ordered table of `(Intent, trigger)` pairs is scanned top to
//! bottom; the first trigger matching the start of the query wins. Several
//! triggers overlap ("show next" starts both `next` and `list`), so the table
//! order is part of the behavior.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum::EnumString;

/// What a request asks the task tool to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Intent {
    Add,
    List,
    #[strum(serialize = "complete", serialize = "done")]
    Complete,
    Modify,
    Delete,
    Prioritize,
    Context,
    Next,
    Raw,
}

impl Intent {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Add => "add",
            Intent::List => "list",
            Intent::Complete => "complete",
            Intent::Modify => "modify",
            Intent::Delete => "delete",
            Intent::Prioritize => "prioritize",
            Intent::Context => "context",
            Intent::Next => "next",
            Intent::Raw => "raw",
        }
    }

    /// Intents whose output is a task listing.
    pub fn is_listing(&self) -> bool {
        matches!(self, Intent::List | Intent::Next)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedRequest {
    pub intent: Intent,
    /// Query with the matched trigger removed.
    pub residual: String,
}

/// Declaration order is precedence order.
const TRIGGER_PATTERNS: [(Intent, &str); 9] = [
    (Intent::Add, r"^(?:add|create|new)\b(?:\s+(?:a\s+)?(?:new\s+)?(?:task|todo)\b)?"),
    (Intent::Complete, r"^(?:complete|finish|done|mark)\b"),
    (Intent::Modify, r"^(?:modify|change|update|edit)\b"),
    (Intent::Delete, r"^(?:delete|remove|drop)\b"),
    (Intent::Prioritize, r"^(?:prioriti[sz]e|set\s+priority|bump)\b"),
    (Intent::Context, r"^(?:switch\s+(?:to\s+)?context|use\s+context|context)\b"),
    (Intent::Next, r"^(?:what(?:'s|\s+is)\s+next|show\s+next|next)\b"),
    (Intent::List, r"^(?:list|show|display|what)\b"),
    (Intent::Raw, r"^(?:raw|run)\b"),
];

static TRIGGERS: LazyLock<Vec<(Intent, Regex)>> = LazyLock::new(|| {
    TRIGGER_PATTERNS
        .iter()
        .map(|(intent, pattern)| {
            let regex = Regex::new(&format!("(?i){pattern}")).expect("trigger regex");
            (*intent, regex)
        })
        .collect()
});

/// Classify a natural-language query.
///
/// Unmatched queries are `list` requests with the whole query as residual.
pub fn classify(query: &str) -> ParsedRequest {
    let trimmed = query.trim_start();

    for (intent, trigger) in TRIGGERS.iter() {
        if let Some(m) = trigger.find(trimmed) {
            let residual = trimmed[m.end()..]
                .trim_start()
                .trim_start_matches(':')
                .trim()
                .to_string();
            tracing::trace!(%intent, %residual, "classified query");
            return ParsedRequest { intent: *intent, residual };
        }
    }

    ParsedRequest {
        intent: Intent::List,
        residual: query.to_string(),
    }
}
