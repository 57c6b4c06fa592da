//! Project and ticket context detection.
//!
//! Works out which project and ticket the user is working on so task commands
//! can be scoped without the caller spelling it out. Detection reads the
//! filesystem and asks git; every probe is optional and a fully empty
//! [`Context`] is a valid answer.
//!
//! ## Sources, in order
//!
//! 1. **Project**: an override marker file in the working directory, else the
//!    git top-level directory name, else the working directory name.
//! 2. **Ticket**: the `currentFocus.ticket` field of a JSON state file at the
//!    workspace root, then the ticket code embedded in the current branch name.
//!    The branch wins when both are present.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), taskweave_context::ContextError> {
//! use std::sync::Arc;
//! use taskweave_context::{ContextDetector, DetectorConfig, GitCli};
//!
//! let config = DetectorConfig::new(std::env::current_dir().unwrap());
//! let detector = ContextDetector::new(config, Arc::new(GitCli::new()))?;
//! let ctx = detector.detect().await;
//! println!("scope: {}", ctx.taskwarrior_project());
//! # Ok(())
//! # }
//! ```

mod git;
mod tickets;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

pub use git::{GitCli, VcsProbe};
pub use tickets::{CHECKLIST_FILE, NOTES_FILE, parse_checklist, parse_todo_notes};

/// Scope label used when neither a ticket nor a project is known.
pub const DEFAULT_PROJECT: &str = "general";

/// Marker that a task description already carries a project attribute.
pub const PROJECT_MARKER: &str = "project:";

pub const DEFAULT_MARKER_FILE: &str = ".taskweave-project";
pub const DEFAULT_STATE_FILE: &str = ".taskweave/state.json";
pub const DEFAULT_TICKETS_DIR: &str = "tickets";
pub const DEFAULT_TICKET_PATTERN: &str = r"[A-Z][A-Z0-9]+-\d+";

/// Errors constructing a detector. Detection itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("invalid ticket pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("'{0}' is not a ticket identifier")]
    NotATicket(String),
}

/// Inferred scope for task commands.
///
/// Fields are either absent or non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub current_ticket: Option<String>,
    pub current_project: Option<String>,
    #[serde(serialize_with = "lossy_path")]
    pub workspace_path: Option<PathBuf>,
    #[serde(serialize_with = "lossy_path")]
    pub tickets_path: Option<PathBuf>,
}

/// Paths serialize as text even when they are not valid UTF-8.
fn lossy_path<S: Serializer>(path: &Option<PathBuf>, serializer: S) -> Result<S::Ok, S::Error> {
    match path {
        Some(path) => serializer.serialize_some(&path.to_string_lossy()),
        None => serializer.serialize_none(),
    }
}

impl Context {
    /// Ticket, else project, else [`DEFAULT_PROJECT`].
    pub fn taskwarrior_project(&self) -> String {
        self.scope_label()
            .unwrap_or(DEFAULT_PROJECT)
            .to_string()
    }

    /// `project:<scope>` qualifier, or `None` when nothing is known.
    pub fn scope_filter(&self) -> Option<String> {
        self.scope_label().map(|label| format!("{PROJECT_MARKER}{label}"))
    }

    fn scope_label(&self) -> Option<&str> {
        self.current_ticket
            .as_deref()
            .or(self.current_project.as_deref())
    }

    /// Tag a task description with the current ticket and project.
    ///
    /// Adds `+<ticket>` unless the ticket already appears in the text, and
    /// `project:<scope>` unless the text already names a project. Applying it
    /// to its own output changes nothing.
    pub fn enhance_task_description(&self, text: &str) -> String {
        let base = text.trim();
        let mut parts = Vec::with_capacity(3);
        if !base.is_empty() {
            parts.push(base.to_string());
        }

        if let Some(ticket) = &self.current_ticket {
            if !base.contains(ticket.as_str()) {
                parts.push(format!("+{ticket}"));
            }
        }

        if !base.contains(PROJECT_MARKER) {
            parts.push(format!("{PROJECT_MARKER}{}", self.taskwarrior_project()));
        }

        parts.join(" ")
    }
}

/// Where and how to look for context.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Directory detection starts from (normally the process cwd).
    pub working_dir: PathBuf,
    /// Override marker file name; its first line names the project.
    pub marker_file: String,
    /// JSON state file, relative to the workspace root.
    pub state_file: String,
    /// Tickets directory, relative to the workspace root.
    pub tickets_dir: String,
    /// Regex for a ticket code, unanchored.
    pub ticket_pattern: String,
}

impl DetectorConfig {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            state_file: DEFAULT_STATE_FILE.to_string(),
            tickets_dir: DEFAULT_TICKETS_DIR.to_string(),
            ticket_pattern: DEFAULT_TICKET_PATTERN.to_string(),
        }
    }
}

/// Shape of the state file; only the focused ticket is read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FocusState {
    current_focus: Option<Focus>,
}

#[derive(Debug, Deserialize)]
struct Focus {
    ticket: Option<String>,
}

/// Project identity resolved by the first detection stage.
#[derive(Debug, Default)]
struct ProjectIdentity {
    project: Option<String>,
    workspace: Option<PathBuf>,
}

/// Detects [`Context`] on demand.
///
/// Holds no cached context; each [`detect`](Self::detect) re-reads the
/// filesystem. The only state is an explicit ticket override.
pub struct ContextDetector {
    config: DetectorConfig,
    vcs: Arc<dyn VcsProbe>,
    /// Finds a ticket code anywhere in a string (branch names).
    ticket_search: Regex,
    /// Ticket code at the start of a string (directory names).
    ticket_prefix: Regex,
    /// Whole string is a ticket code.
    ticket_exact: Regex,
    ticket_override: Mutex<Option<String>>,
}

impl std::fmt::Debug for ContextDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextDetector")
            .field("config", &self.config)
            .field("ticket_override", &*self.ticket_override.lock())
            .finish()
    }
}

impl ContextDetector {
    pub fn new(mut config: DetectorConfig, vcs: Arc<dyn VcsProbe>) -> Result<Self, ContextError> {
        config.working_dir = resolve_working_dir(&config.working_dir);

        let compile = |source: String| {
            Regex::new(&source).map_err(|e| ContextError::InvalidPattern {
                pattern: config.ticket_pattern.clone(),
                source: e,
            })
        };

        let ticket_search = compile(config.ticket_pattern.clone())?;
        let ticket_prefix = compile(format!("^(?:{})", config.ticket_pattern))?;
        let ticket_exact = compile(format!("^(?:{})$", config.ticket_pattern))?;

        Ok(Self {
            config,
            vcs,
            ticket_search,
            ticket_prefix,
            ticket_exact,
            ticket_override: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Whether `candidate` is exactly one ticket code.
    pub fn is_ticket(&self, candidate: &str) -> bool {
        self.ticket_exact.is_match(candidate)
    }

    /// Pin the current ticket until a detection finds one on its own.
    pub fn set_ticket(&self, ticket: &str) -> Result<(), ContextError> {
        let ticket = ticket.trim();
        if !self.is_ticket(ticket) {
            return Err(ContextError::NotATicket(ticket.to_string()));
        }
        tracing::info!(ticket, "ticket override set");
        *self.ticket_override.lock() = Some(ticket.to_string());
        Ok(())
    }

    /// Detect the current context.
    pub async fn detect(&self) -> Context {
        let identity = self.detect_project().await;
        let tickets_path = identity
            .workspace
            .as_ref()
            .map(|root| root.join(&self.config.tickets_dir));

        let mut ticket = None;
        if let Some(root) = &identity.workspace {
            if let Some(found) = self.state_file_ticket(root).await {
                ticket = Some(found);
            }
        }
        if let Some(found) = self.branch_ticket().await {
            ticket = Some(found);
        }

        let current_ticket = {
            let mut pinned = self.ticket_override.lock();
            match ticket {
                Some(found) => {
                    if pinned.take().is_some() {
                        tracing::debug!(ticket = %found, "detected ticket replaces override");
                    }
                    Some(found)
                }
                None => pinned.clone(),
            }
        };

        let ctx = Context {
            current_ticket,
            current_project: identity.project,
            workspace_path: identity.workspace,
            tickets_path,
        };
        tracing::debug!(?ctx, "context detected");
        ctx
    }

    async fn detect_project(&self) -> ProjectIdentity {
        let cwd = &self.config.working_dir;

        if let Some(project) = self.marker_project(cwd).await {
            tracing::debug!(%project, "project from marker file");
            return ProjectIdentity {
                project: Some(project),
                workspace: Some(cwd.clone()),
            };
        }

        if let Some(top) = self.vcs.toplevel(cwd).await {
            if let Some(project) = dir_name(&top) {
                tracing::debug!(%project, root = %top.display(), "project from git toplevel");
                return ProjectIdentity {
                    project: Some(project),
                    workspace: Some(top),
                };
            }
        }

        tracing::debug!(cwd = %cwd.display(), "no marker or repository, using directory name");
        ProjectIdentity {
            project: dir_name(cwd),
            workspace: None,
        }
    }

    async fn marker_project(&self, cwd: &Path) -> Option<String> {
        let content = tokio::fs::read_to_string(cwd.join(&self.config.marker_file))
            .await
            .ok()?;
        let name = content.lines().next()?.trim();
        if name.is_empty() { None } else { Some(name.to_string()) }
    }

    async fn state_file_ticket(&self, workspace: &Path) -> Option<String> {
        let path = workspace.join(&self.config.state_file);
        let content = tokio::fs::read_to_string(&path).await.ok()?;

        let state: FocusState = match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "ignoring malformed state file");
                return None;
            }
        };

        state
            .current_focus
            .and_then(|focus| focus.ticket)
            .map(|ticket| ticket.trim().to_string())
            .filter(|ticket| !ticket.is_empty())
    }

    async fn branch_ticket(&self) -> Option<String> {
        let branch = self.vcs.current_branch(&self.config.working_dir).await?;
        let found = self.ticket_search.find(&branch)?;
        tracing::debug!(%branch, ticket = found.as_str(), "ticket from branch");
        Some(found.as_str().to_string())
    }

    /// Open tasks recorded for `ticket`; empty without a tickets path.
    pub async fn get_ticket_tasks(&self, ctx: &Context, ticket: &str) -> Vec<String> {
        match &ctx.tickets_path {
            Some(root) => tickets::read_ticket_tasks(root, ticket).await,
            None => Vec::new(),
        }
    }

    /// Ticket directory names; empty without a tickets path.
    pub async fn list_tickets(&self, ctx: &Context) -> Vec<String> {
        match &ctx.tickets_path {
            Some(root) => tickets::list_ticket_dirs(root, &self.ticket_prefix).await,
            None => Vec::new(),
        }
    }
}

/// Absolute form of a relative or `..`-terminated working directory.
///
/// Falls back to the path as given when it cannot be resolved.
fn resolve_working_dir(path: &Path) -> PathBuf {
    if path.is_absolute() && path.file_name().is_some() {
        return path.to_path_buf();
    }
    match std::fs::canonicalize(path).or_else(|_| std::path::absolute(path)) {
        Ok(resolved) => {
            tracing::debug!(given = %path.display(), resolved = %resolved.display(), "resolved working dir");
            resolved
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot resolve working dir");
            path.to_path_buf()
        }
    }
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    #[derive(Default)]
    struct StubVcs {
        toplevel: Option<PathBuf>,
        branch: Option<String>,
    }

    #[async_trait]
    impl VcsProbe for StubVcs {
        async fn toplevel(&self, _cwd: &Path) -> Option<PathBuf> {
            self.toplevel.clone()
        }

        async fn current_branch(&self, _cwd: &Path) -> Option<String> {
            self.branch.clone()
        }
    }

    fn detector(cwd: &Path, vcs: StubVcs) -> ContextDetector {
        ContextDetector::new(DetectorConfig::new(cwd), Arc::new(vcs)).unwrap()
    }

    fn write_state(root: &Path, json: &str) {
        let path = root.join(DEFAULT_STATE_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, json).unwrap();
    }

    #[tokio::test]
    async fn marker_file_names_the_project() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "my-project\n").unwrap();

        let ctx = detector(dir.path(), StubVcs::default()).detect().await;

        assert_eq!(ctx.current_project.as_deref(), Some("my-project"));
        assert_eq!(ctx.workspace_path.as_deref(), Some(dir.path()));
        assert_eq!(ctx.tickets_path, Some(dir.path().join(DEFAULT_TICKETS_DIR)));
        assert_eq!(ctx.taskwarrior_project(), "my-project");
    }

    #[tokio::test]
    async fn marker_uses_only_the_first_line() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), " web \nowner: ops\n").unwrap();

        let ctx = detector(dir.path(), StubVcs::default()).detect().await;
        assert_eq!(ctx.current_project.as_deref(), Some("web"));
        assert_eq!(ctx.scope_filter().as_deref(), Some("project:web"));
    }

    #[tokio::test]
    async fn relative_working_dir_is_resolved() {
        let ctx = detector(Path::new("."), StubVcs::default()).detect().await;
        let cwd = std::fs::canonicalize(std::env::current_dir().unwrap()).unwrap();
        let expected = cwd.file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(ctx.current_project, Some(expected));
    }

    #[tokio::test]
    async fn parent_dir_suffix_is_resolved() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("outer");
        std::fs::create_dir_all(project.join("inner")).unwrap();

        let ctx = detector(&project.join("inner").join(".."), StubVcs::default()).detect().await;
        assert_eq!(ctx.current_project.as_deref(), Some("outer"));
    }

    #[test]
    fn missing_relative_dir_is_made_absolute() {
        let resolved = resolve_working_dir(Path::new("no-such-dir-for-taskweave"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("no-such-dir-for-taskweave"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_serialize_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = PathBuf::from(OsStr::from_bytes(b"/src/proj\xff"));
        let ctx = Context {
            current_project: Some("proj".to_string()),
            tickets_path: Some(root.join("tickets")),
            workspace_path: Some(root),
            ..Default::default()
        };

        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["workspace_path"], "/src/proj\u{fffd}");
        assert_eq!(value["tickets_path"], "/src/proj\u{fffd}/tickets");
        assert!(value["current_ticket"].is_null());
    }

    #[tokio::test]
    async fn marker_beats_repository() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "override").unwrap();
        let vcs = StubVcs {
            toplevel: Some(PathBuf::from("/src/repo-name")),
            ..Default::default()
        };

        let ctx = detector(dir.path(), vcs).detect().await;
        assert_eq!(ctx.current_project.as_deref(), Some("override"));
    }

    #[tokio::test]
    async fn blank_marker_falls_through_to_git() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "  \n").unwrap();
        let vcs = StubVcs {
            toplevel: Some(PathBuf::from("/src/repo-name")),
            ..Default::default()
        };

        let ctx = detector(dir.path(), vcs).detect().await;
        assert_eq!(ctx.current_project.as_deref(), Some("repo-name"));
        assert_eq!(ctx.workspace_path, Some(PathBuf::from("/src/repo-name")));
        assert_eq!(ctx.tickets_path, Some(PathBuf::from("/src/repo-name/tickets")));
    }

    #[tokio::test]
    async fn no_repository_uses_directory_name() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().join("scratch-area");
        std::fs::create_dir_all(&cwd).unwrap();

        let ctx = detector(&cwd, StubVcs::default()).detect().await;

        assert_eq!(ctx.current_project.as_deref(), Some("scratch-area"));
        assert_eq!(ctx.workspace_path, None);
        assert_eq!(ctx.tickets_path, None);
        assert_eq!(ctx.current_ticket, None);
    }

    #[tokio::test]
    async fn state_file_supplies_ticket() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "proj").unwrap();
        write_state(dir.path(), r#"{"currentFocus": {"ticket": "PROJ-7"}}"#);

        let ctx = detector(dir.path(), StubVcs::default()).detect().await;
        assert_eq!(ctx.current_ticket.as_deref(), Some("PROJ-7"));
        assert_eq!(ctx.taskwarrior_project(), "PROJ-7");
    }

    #[tokio::test]
    async fn branch_ticket_wins_over_state_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "proj").unwrap();
        write_state(dir.path(), r#"{"currentFocus": {"ticket": "PROJ-7"}}"#);
        let vcs = StubVcs {
            branch: Some("feature/PROJ-42-login-form".to_string()),
            ..Default::default()
        };

        let ctx = detector(dir.path(), vcs).detect().await;
        assert_eq!(ctx.current_ticket.as_deref(), Some("PROJ-42"));
    }

    #[tokio::test]
    async fn plain_branch_keeps_state_ticket() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "proj").unwrap();
        write_state(dir.path(), r#"{"currentFocus": {"ticket": "PROJ-7"}}"#);
        let vcs = StubVcs {
            branch: Some("main".to_string()),
            ..Default::default()
        };

        let ctx = detector(dir.path(), vcs).detect().await;
        assert_eq!(ctx.current_ticket.as_deref(), Some("PROJ-7"));
    }

    #[tokio::test]
    async fn malformed_state_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "proj").unwrap();

        for bad in ["{not json", r#"{"currentFocus": {"ticket": 12}}"#, r#"{"currentFocus": null}"#, r#"{"currentFocus": {"ticket": ""}}"#] {
            write_state(dir.path(), bad);
            let ctx = detector(dir.path(), StubVcs::default()).detect().await;
            assert_eq!(ctx.current_ticket, None, "state file: {bad}");
            assert_eq!(ctx.current_project.as_deref(), Some("proj"));
        }
    }

    #[tokio::test]
    async fn override_persists_until_a_ticket_is_detected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "proj").unwrap();
        let detector = detector(dir.path(), StubVcs::default());

        detector.set_ticket("PROJ-5").unwrap();
        assert_eq!(detector.detect().await.current_ticket.as_deref(), Some("PROJ-5"));
        assert_eq!(detector.detect().await.current_ticket.as_deref(), Some("PROJ-5"));

        write_state(dir.path(), r#"{"currentFocus": {"ticket": "PROJ-9"}}"#);
        assert_eq!(detector.detect().await.current_ticket.as_deref(), Some("PROJ-9"));

        std::fs::remove_file(dir.path().join(DEFAULT_STATE_FILE)).unwrap();
        assert_eq!(detector.detect().await.current_ticket, None);
    }

    #[test]
    fn set_ticket_rejects_non_ticket() {
        let dir = TempDir::new().unwrap();
        let detector = detector(dir.path(), StubVcs::default());

        assert!(matches!(detector.set_ticket("not a ticket"), Err(ContextError::NotATicket(_))));
        assert!(detector.set_ticket("PROJ-12").is_ok());
        assert!(!detector.is_ticket("PROJ-12-extra"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let mut config = DetectorConfig::new("/tmp");
        config.ticket_pattern = "([unclosed".to_string();
        let err = ContextDetector::new(config, Arc::new(StubVcs::default())).unwrap_err();
        assert!(matches!(err, ContextError::InvalidPattern { .. }));
    }

    #[tokio::test]
    async fn ticket_helpers_without_tickets_path_are_empty() {
        let dir = TempDir::new().unwrap();
        let detector = detector(dir.path(), StubVcs::default());
        let ctx = Context::default();

        assert!(detector.list_tickets(&ctx).await.is_empty());
        assert!(detector.get_ticket_tasks(&ctx, "PROJ-1").await.is_empty());
    }

    #[tokio::test]
    async fn ticket_helpers_read_under_workspace() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_MARKER_FILE), "proj").unwrap();
        let ticket_dir = dir.path().join(DEFAULT_TICKETS_DIR).join("PROJ-3");
        std::fs::create_dir_all(&ticket_dir).unwrap();
        std::fs::write(ticket_dir.join(CHECKLIST_FILE), "- [ ] A\n- [ ] B\n").unwrap();
        std::fs::create_dir_all(dir.path().join(DEFAULT_TICKETS_DIR).join("archive")).unwrap();

        let detector = detector(dir.path(), StubVcs::default());
        let ctx = detector.detect().await;

        assert_eq!(detector.list_tickets(&ctx).await, vec!["PROJ-3"]);
        assert_eq!(detector.get_ticket_tasks(&ctx, "PROJ-3").await, vec!["A", "B"]);
    }

    #[test]
    fn project_fallback_chain() {
        let mut ctx = Context::default();
        assert_eq!(ctx.taskwarrior_project(), DEFAULT_PROJECT);
        assert_eq!(ctx.scope_filter(), None);

        ctx.current_project = Some("web".to_string());
        assert_eq!(ctx.taskwarrior_project(), "web");
        assert_eq!(ctx.scope_filter().as_deref(), Some("project:web"));

        ctx.current_ticket = Some("WEB-3".to_string());
        assert_eq!(ctx.taskwarrior_project(), "WEB-3");
        assert_eq!(ctx.scope_filter().as_deref(), Some("project:WEB-3"));
    }

    #[test]
    fn enhance_adds_ticket_and_project() {
        let ctx = Context {
            current_ticket: Some("WEB-3".to_string()),
            current_project: Some("web".to_string()),
            ..Default::default()
        };
        assert_eq!(ctx.enhance_task_description("fix header"), "fix header +WEB-3 project:WEB-3");
        assert_eq!(ctx.enhance_task_description("WEB-3 fix header"), "WEB-3 fix header project:WEB-3");
        assert_eq!(ctx.enhance_task_description("fix header project:other"), "fix header project:other +WEB-3");
    }

    #[test]
    fn enhance_is_idempotent() {
        let contexts = [
            Context::default(),
            Context {
                current_project: Some("web".to_string()),
                ..Default::default()
            },
            Context {
                current_ticket: Some("WEB-3".to_string()),
                ..Default::default()
            },
        ];

        for ctx in &contexts {
            for text in ["write docs", "  padded  ", "", "due:tomorrow call bob"] {
                let once = ctx.enhance_task_description(text);
                assert_eq!(ctx.enhance_task_description(&once), once, "ctx {ctx:?} text {text:?}");
            }
        }
    }
}
