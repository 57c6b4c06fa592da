//! Command synthesis: intent + residual text + context → taskwarrior command.

use std::sync::LazyLock;

use regex::Regex;
use taskweave_context::Context;

use crate::classify::Intent;
use crate::command::{SynthesizedCommand, split_words, tokenize};

/// Task id completed when a `complete` request names none.
///
/// Completing task 1 on a bare "done" is long-standing behavior that callers
/// rely on; it can complete the wrong task, so every use is logged.
pub const DEFAULT_COMPLETE_ID: &str = "1";

static TODAY_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:today|now)\b").expect("today cue"));

static URGENT_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:urgent|high|important)\b").expect("urgent cue"));

static PROJECT_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bproject\s+([\w.-]+)").expect("project cue"));

static TASK_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("task id"));

/// Build the taskwarrior command for a classified request.
pub fn synthesize(intent: Intent, residual: &str, ctx: &Context) -> SynthesizedCommand {
    let scope = || ctx.scope_filter().into_iter().collect::<Vec<_>>();

    let command = match intent {
        Intent::Add => SynthesizedCommand::new("add", split_words(residual)),
        Intent::List => SynthesizedCommand::new("list", list_filter(residual, scope)),
        Intent::Complete => {
            let id = match TASK_ID.find(residual) {
                Some(m) => m.as_str().to_string(),
                None => {
                    tracing::warn!(
                        %residual,
                        id = DEFAULT_COMPLETE_ID,
                        "no task id in completion request, completing default task"
                    );
                    DEFAULT_COMPLETE_ID.to_string()
                }
            };
            SynthesizedCommand::new("done", vec![id])
        }
        Intent::Next => SynthesizedCommand::new("next", scope()),
        Intent::Context => {
            let args = if residual.trim().is_empty() {
                vec!["list".to_string()]
            } else {
                tokenize(residual)
            };
            SynthesizedCommand::new("context", args)
        }
        Intent::Modify | Intent::Delete | Intent::Prioritize | Intent::Raw => {
            SynthesizedCommand::new(intent.as_str(), tokenize(residual))
        }
    };

    tracing::debug!(%intent, command = %command, "synthesized command");
    command
}

fn list_filter(residual: &str, scope: impl Fn() -> Vec<String>) -> Vec<String> {
    if TODAY_CUE.is_match(residual) {
        let mut args = vec!["due:today".to_string()];
        args.extend(scope());
        return args;
    }
    if URGENT_CUE.is_match(residual) {
        let mut args = vec!["priority:H".to_string()];
        args.extend(scope());
        return args;
    }
    if let Some(caps) = PROJECT_CUE.captures(residual) {
        return vec![format!("project:{}", &caps[1])];
    }
    scope()
}
