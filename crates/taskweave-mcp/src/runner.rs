//! Taskwarrior process execution.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use taskweave_intent::SynthesizedCommand;
use tokio::process::Command;

/// Prefix of the stderr notice taskwarrior prints for every `rc.` override.
const RC_OVERRIDE_NOTICE: &str = "Configuration override";

/// Errors from running the task tool.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("failed to start '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("task exited with {}: {message}", exit_label(.code))]
    Failed { code: Option<i32>, message: String },

    #[error("task did not finish within {secs}s")]
    Timeout { secs: u64 },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}

/// Executes synthesized commands against the task tool.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    /// Run `command` and return its stdout.
    async fn run(&self, command: &SynthesizedCommand) -> Result<String, TaskError>;
}

/// [`TaskRunner`] that spawns the taskwarrior binary.
#[derive(Debug, Clone)]
pub struct TaskwarriorCli {
    binary: String,
    rc_overrides: Vec<String>,
    timeout: Option<Duration>,
}

impl TaskwarriorCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            rc_overrides: Vec::new(),
            timeout: None,
        }
    }

    /// `rc.name=value` arguments placed before every command.
    pub fn with_rc_overrides(mut self, overrides: Vec<String>) -> Self {
        self.rc_overrides = overrides;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl TaskRunner for TaskwarriorCli {
    async fn run(&self, command: &SynthesizedCommand) -> Result<String, TaskError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.rc_overrides)
            .args(command.to_argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(binary = %self.binary, %command, "spawning task");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| TaskError::Timeout { secs: limit.as_secs() })?,
            None => cmd.output().await,
        }
        .map_err(|source| TaskError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = meaningful_stderr(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            let message = if stderr.is_empty() {
                stdout.trim().to_string()
            } else {
                stderr
            };
            return Err(TaskError::Failed {
                code: output.status.code(),
                message,
            });
        }

        if !stderr.is_empty() {
            tracing::warn!(%command, %stderr, "task wrote to stderr");
        }

        Ok(stdout)
    }
}

/// Stderr with override notices and blank lines removed.
fn meaningful_stderr(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(RC_OVERRIDE_NOTICE))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command(line: &str) -> SynthesizedCommand {
        SynthesizedCommand::parse(line).unwrap()
    }

    #[test]
    fn override_notices_are_dropped() {
        let stderr = "Configuration override rc.confirmation=off\n\nReal problem here\n";
        assert_eq!(meaningful_stderr(stderr), "Real problem here");
        assert_eq!(meaningful_stderr("Configuration override rc.verbose=nothing\n"), "");
    }

    #[tokio::test]
    async fn overrides_precede_the_command() {
        let runner = TaskwarriorCli::new("echo").with_rc_overrides(vec!["rc.confirmation=off".into()]);
        let out = runner.run(&command("list project:web")).await.unwrap();
        assert_eq!(out.trim(), "rc.confirmation=off list project:web");
    }

    #[tokio::test]
    async fn nonzero_exit_is_failure() {
        let runner = TaskwarriorCli::new("false");
        let err = runner.run(&command("list")).await.unwrap_err();
        assert!(matches!(err, TaskError::Failed { code: Some(1), .. }), "{err:?}");
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_error() {
        let runner = TaskwarriorCli::new("taskweave-no-such-task-binary");
        let err = runner.run(&command("list")).await.unwrap_err();
        assert!(matches!(err, TaskError::Spawn { .. }));
        assert!(err.to_string().contains("taskweave-no-such-task-binary"));
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let runner = TaskwarriorCli::new("sleep").with_timeout(Some(Duration::from_millis(100)));
        let err = runner.run(&command("5")).await.unwrap_err();
        assert!(matches!(err, TaskError::Timeout { .. }));
    }

    #[test]
    fn failure_message_names_exit_code() {
        let err = TaskError::Failed { code: Some(2), message: "No matches.".into() };
        assert_eq!(err.to_string(), "task exited with code 2: No matches.");
        let err = TaskError::Failed { code: None, message: "killed".into() };
        assert_eq!(err.to_string(), "task exited with signal: killed");
    }
}
