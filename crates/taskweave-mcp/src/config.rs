//! Server configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, the TOML
//! file at `~/.config/taskweave/config.toml` (or `--config`), and CLI flags.
//!
//! ```toml
//! task_bin = "task"
//! rc_overrides = ["rc.confirmation=off"]
//! timeout_secs = 30          # 0 waits forever
//! ticket_pattern = "[A-Z][A-Z0-9]+-\\d+"
//! tickets_dir = "tickets"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use taskweave_context::{
    DEFAULT_MARKER_FILE, DEFAULT_STATE_FILE, DEFAULT_TICKET_PATTERN, DEFAULT_TICKETS_DIR,
    DetectorConfig,
};

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Taskwarrior executable.
    pub task_bin: String,
    /// `rc.` overrides passed before every command.
    pub rc_overrides: Vec<String>,
    /// Per-command limit in seconds; 0 disables.
    pub timeout_secs: u64,
    /// Git executable used for context detection.
    pub git_bin: String,
    pub marker_file: String,
    pub state_file: String,
    pub tickets_dir: String,
    pub ticket_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_bin: "task".to_string(),
            rc_overrides: vec!["rc.confirmation=off".to_string()],
            timeout_secs: 30,
            git_bin: "git".to_string(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            state_file: DEFAULT_STATE_FILE.to_string(),
            tickets_dir: DEFAULT_TICKETS_DIR.to_string(),
            ticket_pattern: DEFAULT_TICKET_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// `~/.config/taskweave/config.toml` (platform config dir).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("taskweave").join("config.toml"))
    }

    /// Load from `path`, or from the default path when it exists.
    ///
    /// An explicit path must be readable; a missing default file means
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn detector_config(&self, working_dir: impl Into<PathBuf>) -> DetectorConfig {
        DetectorConfig {
            working_dir: working_dir.into(),
            marker_file: self.marker_file.clone(),
            state_file: self.state_file.clone(),
            tickets_dir: self.tickets_dir.clone(),
            ticket_pattern: self.ticket_pattern.clone(),
        }
    }
}
