//! MCP server turning natural-language task requests into taskwarrior commands.
//!
//! Every request re-detects the project/ticket [`Context`], so commands are
//! scoped to whatever the user is working on without the caller passing it.
//!
//! ## Pipeline
//!
//! `task_query` → [`classify`] → [`synthesize`] with a fresh [`Context`] →
//! [`TaskRunner`] → [`normalize`] → text response.
//!
//! ## Module Structure
//!
//! - `models`: Request types for MCP tools
//! - `runner`: Taskwarrior process execution
//! - `config`: TOML + CLI configuration
//! - `helpers`: Response formatting and the Eisenhower matrix

pub mod config;
mod helpers;
mod models;
pub mod runner;

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, ListResourcesResult, LoggingLevel,
        PaginatedRequestParams, RawResource, ReadResourceRequestParams, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo, SetLevelRequestParams,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use taskweave_context::{Context, ContextDetector, ContextError, GitCli};
use taskweave_intent::{Intent, SynthesizedCommand, classify, normalize, split_words, synthesize};
use tracing_subscriber::{EnvFilter, Registry, reload};

pub use config::{Config, ConfigError};
pub use models::*;
pub use runner::{TaskError, TaskRunner, TaskwarriorCli};
use helpers::*;

/// Prefix for every external-tool failure returned to the caller.
pub const EXEC_ERROR_PREFIX: &str = "Error executing task command";

const CONTEXT_URI: &str = "taskweave://context";
const TICKETS_URI: &str = "taskweave://tickets";

/// Taskwarrior's message for a filter that selects nothing (exit code 1).
const NO_MATCHES: &str = "No matches";

// ============================================================================
// TaskweaveMcp Server
// ============================================================================

/// Reload handle on the process-wide tracing filter.
#[derive(Clone)]
pub struct LogFilter(reload::Handle<EnvFilter, Registry>);

impl LogFilter {
    pub fn new(handle: reload::Handle<EnvFilter, Registry>) -> Self {
        Self(handle)
    }

    /// Replace the active filter with one at `level`.
    pub fn apply(&self, level: LoggingLevel) -> Result<(), reload::Error> {
        self.0.reload(EnvFilter::new(level_directive(level)))
    }

    /// Active filter directives.
    pub fn current(&self) -> Option<String> {
        self.0.with_current(|filter| filter.to_string()).ok()
    }
}

/// MCP syslog-style levels collapsed onto tracing levels.
fn level_directive(level: LoggingLevel) -> &'static str {
    match level {
        LoggingLevel::Debug => "debug",
        LoggingLevel::Info | LoggingLevel::Notice => "info",
        LoggingLevel::Warning => "warn",
        LoggingLevel::Error
        | LoggingLevel::Critical
        | LoggingLevel::Alert
        | LoggingLevel::Emergency => "error",
    }
}

/// Shared state for server-side MCP features.
#[derive(Clone, Default)]
pub struct McpServerState {
    /// Target of `logging/setLevel`; absent when the binary installed none.
    pub log_filter: Option<LogFilter>,
}

/// MCP server exposing taskwarrior through natural language.
#[derive(Clone)]
pub struct TaskweaveMcp {
    detector: Arc<ContextDetector>,
    runner: Arc<dyn TaskRunner>,
    /// Held for the duration of each task invocation; one runs at a time.
    request_gate: Arc<tokio::sync::Mutex<()>>,
    tool_router: ToolRouter<Self>,
    server_state: McpServerState,
}

impl std::fmt::Debug for TaskweaveMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskweaveMcp")
            .field("detector", &self.detector)
            .field("tool_router", &self.tool_router)
            .finish()
    }
}

impl TaskweaveMcp {
    /// Create a server from a detector and a task runner.
    pub fn new(detector: Arc<ContextDetector>, runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            detector,
            runner,
            request_gate: Arc::new(tokio::sync::Mutex::new(())),
            tool_router: Self::tool_router(),
            server_state: McpServerState::default(),
        }
    }

    /// Wire up git detection and the taskwarrior CLI from configuration.
    pub fn from_config(
        config: &Config,
        working_dir: impl Into<std::path::PathBuf>,
    ) -> Result<Self, ContextError> {
        let detector = ContextDetector::new(
            config.detector_config(working_dir),
            Arc::new(GitCli::with_binary(&config.git_bin)),
        )?;
        let runner = TaskwarriorCli::new(&config.task_bin)
            .with_rc_overrides(config.rc_overrides.clone())
            .with_timeout(config.timeout());

        Ok(Self::new(Arc::new(detector), Arc::new(runner)))
    }

    /// Route `logging/setLevel` to a reloadable filter.
    pub fn with_log_filter(mut self, filter: LogFilter) -> Self {
        self.server_state.log_filter = Some(filter);
        self
    }

    /// Run one command, serialized with every other invocation.
    async fn exec(&self, command: &SynthesizedCommand) -> Result<String, TaskError> {
        let _turn = self.request_gate.lock().await;
        tracing::info!(%command, "running task");
        self.runner.run(command).await
    }

    /// Run a command and shape the response, mapping failures to tool errors.
    async fn exec_tool(&self, command: &SynthesizedCommand, intent: Intent) -> CallToolResult {
        match self.exec(command).await {
            Ok(output) => text_result(normalize(&output, intent)),
            Err(e) => exec_failure(&e),
        }
    }

    /// Explicit ticket if given, else the detected one.
    fn resolve_ticket(&self, requested: Option<&str>, ctx: &Context) -> Result<String, McpError> {
        match requested.map(str::trim).filter(|t| !t.is_empty()) {
            Some(ticket) if self.detector.is_ticket(ticket) => Ok(ticket.to_string()),
            Some(ticket) => Err(McpError::invalid_params(
                format!("'{ticket}' is not a ticket identifier"),
                None,
            )),
            None => ctx.current_ticket.clone().ok_or_else(|| {
                McpError::invalid_params("no ticket given and none detected", None)
            }),
        }
    }
}

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

fn exec_failure(error: &TaskError) -> CallToolResult {
    tracing::warn!(%error, "task command failed");
    CallToolResult::error(vec![Content::text(format!("{EXEC_ERROR_PREFIX}: {error}"))])
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, McpError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(McpError::invalid_params(format!("'{field}' must not be empty"), None));
    }
    Ok(value)
}

/// Context snapshot plus the scope it resolves to.
fn context_json(ctx: &Context) -> Result<serde_json::Value, McpError> {
    let mut value = serde_json::to_value(ctx)
        .map_err(|e| McpError::internal_error(format!("cannot encode context: {e}"), None))?;
    value["taskwarrior_project"] = ctx.taskwarrior_project().into();
    value["scope_filter"] = ctx.scope_filter().into();
    Ok(value)
}

fn json_text(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[tool_router]
impl TaskweaveMcp {
    // ========================================================================
    // Task Tools
    // ========================================================================

    #[tool(description = "Run a natural-language task request such as 'show urgent tasks', 'add write release notes', 'complete 4', or 'what's next'. Commands are scoped to the detected project or ticket.")]
    #[tracing::instrument(skip(self, req), name = "mcp.task_query")]
    pub async fn task_query(
        &self,
        Parameters(req): Parameters<TaskQueryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query = required(&req.query, "query")?;
        let parsed = classify(query);
        let ctx = self.detector.detect().await;

        let mut command = synthesize(parsed.intent, &parsed.residual, &ctx);
        if parsed.intent == Intent::Add {
            let description = ctx.enhance_task_description(&command.argument_string());
            command.args = split_words(&description);
        }

        tracing::debug!(intent = %parsed.intent, residual = %parsed.residual, "classified query");
        Ok(self.exec_tool(&command, parsed.intent).await)
    }

    #[tool(description = "Run a taskwarrior command line verbatim (without the leading 'task'). Output is returned unmodified.")]
    #[tracing::instrument(skip(self, req), name = "mcp.task_raw")]
    pub async fn task_raw(
        &self,
        Parameters(req): Parameters<TaskRawRequest>,
    ) -> Result<CallToolResult, McpError> {
        let command = SynthesizedCommand::parse(&req.command)
            .ok_or_else(|| McpError::invalid_params("'command' must not be empty", None))?;
        Ok(self.exec_tool(&command, Intent::Raw).await)
    }

    #[tool(description = "Switch the active taskwarrior context, clear it with 'none', or show contexts with 'list'.")]
    #[tracing::instrument(skip(self, req), name = "mcp.task_context")]
    pub async fn task_context(
        &self,
        Parameters(req): Parameters<TaskContextRequest>,
    ) -> Result<CallToolResult, McpError> {
        let name = required(&req.name, "name")?;
        let command = SynthesizedCommand::new("context", vec![name.to_string()]);
        Ok(self.exec_tool(&command, Intent::Context).await)
    }

    #[tool(description = "Add a task with explicit fields. The description is tagged with the current ticket and scoped to the current project unless a project is given.")]
    #[tracing::instrument(skip(self, req), name = "mcp.task_add")]
    pub async fn task_add(
        &self,
        Parameters(req): Parameters<TaskAddRequest>,
    ) -> Result<CallToolResult, McpError> {
        let description = required(&req.description, "description")?;
        let priority = match req.priority.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => Some(priority_arg(raw).ok_or_else(|| {
                McpError::invalid_params(format!("priority must be H, M, or L (got '{raw}')"), None)
            })?),
            None => None,
        };

        let ctx = self.detector.detect().await;

        let mut text = description.to_string();
        if let Some(project) = req.project.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            text.push_str(&format!(" project:{project}"));
        }

        let mut args = split_words(&ctx.enhance_task_description(&text));
        if let Some(priority) = priority {
            args.push(format!("priority:{priority}"));
        }
        if let Some(due) = req.due.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            args.push(format!("due:{due}"));
        }
        args.extend(req.tags.iter().filter_map(|tag| tag_arg(tag)));

        let command = SynthesizedCommand::new("add", args);
        Ok(self.exec_tool(&command, Intent::Add).await)
    }

    #[tool(description = "Show the Eisenhower matrix (do first / schedule / delegate / eliminate) for the current project. Important means priority H; urgent means due within three days.")]
    #[tracing::instrument(skip(self), name = "mcp.eisenhower")]
    pub async fn eisenhower(&self) -> Result<CallToolResult, McpError> {
        let ctx = self.detector.detect().await;
        let mut sections = vec![format!("# Eisenhower matrix ({})", ctx.taskwarrior_project())];

        for quadrant in &QUADRANTS {
            let body = match self.exec(&quadrant.command(&ctx)).await {
                Ok(output) => quadrant_body(&output),
                Err(TaskError::Failed { message, .. }) if message.contains(NO_MATCHES) => {
                    "(none)".to_string()
                }
                Err(e) => return Ok(exec_failure(&e)),
            };
            sections.push(format_quadrant(quadrant, &body));
        }

        Ok(text_result(sections.join("\n\n")))
    }

    // ========================================================================
    // Context Tools
    // ========================================================================

    #[tool(description = "Show the detected context as JSON: current ticket, project, workspace path, tickets path, and the resulting task scope.")]
    pub async fn current_context(&self) -> Result<CallToolResult, McpError> {
        let ctx = self.detector.detect().await;
        Ok(text_result(json_text(&context_json(&ctx)?)))
    }

    #[tool(description = "Summarize where you are: project, ticket, workspace, known tickets, and open checklist items for the current ticket.")]
    pub async fn where_am_i(&self) -> Result<CallToolResult, McpError> {
        let ctx = self.detector.detect().await;
        let tickets = self.detector.list_tickets(&ctx).await;
        let ticket_tasks = match &ctx.current_ticket {
            Some(ticket) => self.detector.get_ticket_tasks(&ctx, ticket).await,
            None => Vec::new(),
        };
        Ok(text_result(format_location(&ctx, &tickets, &ticket_tasks)))
    }

    #[tool(description = "Set the current ticket explicitly. The override holds until a ticket is detected from the state file or git branch.")]
    pub async fn set_ticket(
        &self,
        Parameters(req): Parameters<SetTicketRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.detector
            .set_ticket(&req.ticket)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        Ok(text_result(format!("Current ticket set to {}", req.ticket.trim())))
    }

    // ========================================================================
    // Ticket Tools
    // ========================================================================

    #[tool(description = "List ticket directories in the workspace tickets folder.")]
    pub async fn list_tickets(&self) -> Result<CallToolResult, McpError> {
        let ctx = self.detector.detect().await;
        let Some(root) = &ctx.tickets_path else {
            return Ok(text_result("No tickets directory for this workspace."));
        };

        let tickets = self.detector.list_tickets(&ctx).await;
        if tickets.is_empty() {
            return Ok(text_result(format!("No tickets found in {}", root.display())));
        }

        let mut lines = vec![format!("Tickets in {}:", root.display())];
        lines.extend(tickets.iter().map(|ticket| {
            let marker = if ctx.current_ticket.as_deref() == Some(ticket.as_str()) { " (current)" } else { "" };
            format!("- {ticket}{marker}")
        }));
        Ok(text_result(lines.join("\n")))
    }

    #[tool(description = "Show open checklist items and TODO notes recorded for a ticket (defaults to the current ticket).")]
    pub async fn ticket_tasks(
        &self,
        Parameters(req): Parameters<TicketRequest>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.detector.detect().await;
        let ticket = self.resolve_ticket(req.ticket.as_deref(), &ctx)?;
        let tasks = self.detector.get_ticket_tasks(&ctx, &ticket).await;
        Ok(text_result(format_ticket_tasks(&ticket, &tasks)))
    }

    #[tool(description = "Import a ticket's open checklist items and TODO notes into taskwarrior, tagged with the ticket. Each item is added independently; failures are reported inline.")]
    #[tracing::instrument(skip(self, req), name = "mcp.import_ticket_tasks")]
    pub async fn import_ticket_tasks(
        &self,
        Parameters(req): Parameters<TicketRequest>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.detector.detect().await;
        let ticket = self.resolve_ticket(req.ticket.as_deref(), &ctx)?;
        let tasks = self.detector.get_ticket_tasks(&ctx, &ticket).await;

        if tasks.is_empty() {
            return Ok(text_result(format!("No open tasks found for {ticket}.")));
        }

        let ticket_ctx = Context {
            current_ticket: Some(ticket.clone()),
            ..ctx
        };

        let mut lines = Vec::with_capacity(tasks.len() + 1);
        let mut imported = 0;
        for task in &tasks {
            let command = SynthesizedCommand::new("add", split_words(&ticket_ctx.enhance_task_description(task)));
            match self.exec(&command).await {
                Ok(_) => {
                    imported += 1;
                    lines.push(format!("✓ {task}"));
                }
                Err(e) => {
                    tracing::warn!(%ticket, %task, error = %e, "ticket task import failed");
                    lines.push(format!("✗ {task}: {e}"));
                }
            }
        }

        tracing::info!(%ticket, imported, total = tasks.len(), "imported ticket tasks");
        lines.push(format!("\nImported {imported} of {} tasks from {ticket}.", tasks.len()));
        Ok(text_result(lines.join("\n")))
    }
}

#[tool_handler]
impl ServerHandler for TaskweaveMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_logging()
                .build(),
        )
        .with_instructions(
            "Taskweave turns natural-language task requests into taskwarrior commands scoped to the current project or ticket. Start with task_query; use where_am_i to see the detected context.",
        )
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Resources exposed:
    /// - `taskweave://context` - Detected context as JSON
    /// - `taskweave://tickets` - Ticket directory names as JSON
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            let resources = vec![
                RawResource {
                    uri: CONTEXT_URI.to_string(),
                    name: "context".to_string(),
                    title: Some("Current Context".to_string()),
                    description: Some("Detected project, ticket, and workspace paths".to_string()),
                    mime_type: Some("application/json".to_string()),
                    size: None,
                    icons: None,
                    meta: None,
                }.no_annotation(),
                RawResource {
                    uri: TICKETS_URI.to_string(),
                    name: "tickets".to_string(),
                    title: Some("Tickets".to_string()),
                    description: Some("Ticket directories in the workspace".to_string()),
                    mime_type: Some("application/json".to_string()),
                    size: None,
                    icons: None,
                    meta: None,
                }.no_annotation(),
            ];

            Ok(ListResourcesResult {
                meta: None,
                next_cursor: None,
                resources,
            })
        }
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let uri = request.uri.as_str();
            let ctx = self.detector.detect().await;

            let content = match uri {
                CONTEXT_URI => json_text(&context_json(&ctx)?),
                TICKETS_URI => {
                    let tickets = self.detector.list_tickets(&ctx).await;
                    json_text(&serde_json::json!(tickets))
                }
                _ => {
                    return Err(McpError::invalid_params(
                        format!("Unknown resource URI: {}", uri),
                        None,
                    ));
                }
            };

            Ok(ReadResourceResult::new(vec![ResourceContents::text(
                content,
                request.uri.clone(),
            )]))
        }
    }

    // ========================================================================
    // Logging
    // ========================================================================

    fn set_level(
        &self,
        request: SetLevelRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), McpError>> + Send + '_ {
        async move {
            let Some(filter) = &self.server_state.log_filter else {
                tracing::debug!(level = ?request.level, "no reloadable log filter installed");
                return Ok(());
            };
            filter.apply(request.level).map_err(|e| {
                McpError::internal_error(format!("cannot reload log filter: {e}"), None)
            })?;
            tracing::info!("Log level set to {:?}", request.level);
            Ok(())
        }
    }
}
