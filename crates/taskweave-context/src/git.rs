//! Version-control probing.
//!
//! Detection only ever asks git two questions: where is the repository root,
//! and what branch is checked out. Both answers are optional; a missing `git`
//! binary, a directory outside any repository, or a detached `HEAD` all come
//! back as `None`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

/// Source of repository facts for context detection.
#[async_trait]
pub trait VcsProbe: Send + Sync {
    /// Absolute path of the repository top-level directory containing `cwd`.
    async fn toplevel(&self, cwd: &Path) -> Option<PathBuf>;

    /// Name of the branch checked out in `cwd`.
    async fn current_branch(&self, cwd: &Path) -> Option<String>;
}

/// [`VcsProbe`] backed by the `git` command-line client.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_binary("git")
    }

    /// Use a specific git executable (name on `PATH` or absolute path).
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    /// Run git and return trimmed stdout, or `None` on any failure.
    async fn query(&self, cwd: &Path, args: &[&str]) -> Option<String> {
        let output = match Command::new(&self.binary)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(binary = %self.binary, error = %e, "git unavailable");
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(
                ?args,
                code = ?output.status.code(),
                cwd = %cwd.display(),
                "git query failed"
            );
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VcsProbe for GitCli {
    async fn toplevel(&self, cwd: &Path) -> Option<PathBuf> {
        self.query(cwd, &["rev-parse", "--show-toplevel"])
            .await
            .map(PathBuf::from)
    }

    async fn current_branch(&self, cwd: &Path) -> Option<String> {
        // Detached HEAD reports the literal "HEAD"
        self.query(cwd, &["rev-parse", "--abbrev-ref", "HEAD"])
            .await
            .filter(|branch| branch != "HEAD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_yields_nothing() {
        let git = GitCli::with_binary("taskweave-no-such-git-binary");
        let dir = tempfile::TempDir::new().unwrap();

        assert_eq!(git.toplevel(dir.path()).await, None);
        assert_eq!(git.current_branch(dir.path()).await, None);
    }

    #[test]
    fn default_uses_git_on_path() {
        assert_eq!(GitCli::default().binary, "git");
    }
}
