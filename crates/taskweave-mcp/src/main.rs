//! Taskweave MCP server binary.
//!
//! Exposes taskwarrior to MCP clients through natural-language tools,
//! scoped to the project or ticket detected from the working directory.
//!
//! Usage:
//!   cargo run -p taskweave-mcp
//!   cargo run -p taskweave-mcp -- --workdir ~/src/web --task-bin /usr/local/bin/task
//!
//! Test with MCP inspector:
//!   npx @modelcontextprotocol/inspector cargo run -p taskweave-mcp

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

use taskweave_mcp::{Config, LogFilter, TaskweaveMcp};

/// MCP server turning natural-language requests into taskwarrior commands.
#[derive(Parser, Debug)]
#[command(name = "taskweave-mcp")]
#[command(about = "MCP server for context-aware taskwarrior")]
struct Args {
    /// Config file (default: ~/.config/taskweave/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Taskwarrior executable
    #[arg(long)]
    task_bin: Option<String>,

    /// Directory context is detected from (default: current directory)
    #[arg(short, long)]
    workdir: Option<PathBuf>,

    /// Per-command timeout in seconds; 0 disables
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing to stderr (MCP uses stdio for protocol).
    // The filter sits behind a reload layer so logging/setLevel can swap it.
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into())
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(task_bin) = args.task_bin {
        config.task_bin = task_bin;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }

    let workdir = match args.workdir {
        Some(dir) => std::fs::canonicalize(&dir)
            .with_context(|| format!("cannot resolve --workdir {}", dir.display()))?,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    tracing::info!(
        workdir = %workdir.display(),
        task_bin = %config.task_bin,
        timeout_secs = config.timeout_secs,
        "Starting taskweave"
    );

    let mcp = TaskweaveMcp::from_config(&config, workdir)?
        .with_log_filter(LogFilter::new(filter_handle));

    let service = mcp
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("MCP server error: {:?}", e);
        })?;

    tracing::info!("taskweave-mcp server ready");

    service.waiting().await?;

    tracing::info!("taskweave-mcp server shutting down");
    Ok(())
}
