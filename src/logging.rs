//! Tracing subscriber setup for the binary.
//!
//! The filter comes from `SPHERAG_LOG`, then `RUST_LOG`, then `info`. The CLI
//! writes to stderr; the TUI owns the terminal, so it writes to
//! `~/.spherag/spherag.log` instead.
//!
//! ```no_run
//! use spherag::logging::{LogTarget, LoggingConfig};
//!
//! LoggingConfig::from_env(LogTarget::Stderr).init().ok();
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::auth::config_dir;
use crate::error::{classify_io_error, SystemError};

/// Name of the TUI log file inside the config directory.
pub const LOG_FILE: &str = "spherag.log";

const DEFAULT_LEVEL: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub target: LogTarget,
    /// Filter directive, e.g. `info` or `spherag::api=debug`.
    pub directive: String,
}

impl LoggingConfig {
    pub fn new(target: LogTarget, directive: impl Into<String>) -> Self {
        Self {
            target,
            directive: directive.into(),
        }
    }

    /// Read the directive from `SPHERAG_LOG` or `RUST_LOG`.
    pub fn from_env(target: LogTarget) -> Self {
        Self::from_lookup(target, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(target: LogTarget, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let directive = ["SPHERAG_LOG", "RUST_LOG"]
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        Self::new(target, directive)
    }

    /// Build the filter, falling back to `info` when the directive is invalid.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }

    /// Install the global subscriber. Calling it twice is harmless; the
    /// second call keeps the first subscriber.
    pub fn init(&self) -> Result<(), SystemError> {
        let filter = self.filter();
        let installed = match &self.target {
            LogTarget::Stderr => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init(),
            LogTarget::File(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        classify_io_error(e, Some(parent.to_path_buf()), "create log directory")
                    })?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| classify_io_error(e, Some(path.clone()), "open log file"))?;
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .try_init()
            }
        };
        if installed.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
        Ok(())
    }
}

/// `~/.spherag/spherag.log`.
pub fn default_log_path() -> Result<PathBuf, SystemError> {
    config_dir()
        .map(|dir| dir.join(LOG_FILE))
        .ok_or(SystemError::NoHomeDirectory)
}
