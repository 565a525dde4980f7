//! Logging setup using tracing + tracing-subscriber
//!
//! The terminal UI owns stdout, so in that mode logs go to a file. The
//! detect command and line mode log to stderr. `RUST_LOG` overrides the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{project_dirs, LoggingConfig};

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// File target for the terminal UI: the configured file or the default
    /// one in the project data directory
    pub fn for_tui(settings: &LoggingConfig) -> Result<Self> {
        match &settings.file {
            Some(path) => Ok(LogTarget::File(path.clone())),
            None => Ok(LogTarget::File(
                project_dirs()?.data_local_dir().join("pc-health.log"),
            )),
        }
    }
}

/// Filter directive after applying `-v` flags on top of the configured level
pub fn effective_level(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level directive: {level}")),
    }
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Install the global subscriber
pub fn init_logging(settings: &LoggingConfig, verbose: u8, target: &LogTarget) -> Result<()> {
    let level = effective_level(&settings.level, verbose);
    let filter = build_filter(&level)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    tracing::debug!(level = %level, log_target = ?target, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flags_raise_level() {
        assert_eq!(effective_level("warn", 0), "warn");
        assert_eq!(effective_level("warn", 1), "debug");
        assert_eq!(effective_level("warn", 3), "trace");
    }

    #[test]
    fn test_configured_file_wins() {
        let settings = LoggingConfig {
            level: "info".to_string(),
            file: Some(PathBuf::from("/tmp/pc-health-test.log")),
        };
        assert_eq!(
            LogTarget::for_tui(&settings).unwrap(),
            LogTarget::File(PathBuf::from("/tmp/pc-health-test.log"))
        );
    }

    #[test]
    fn test_log_file_is_created_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pc-health.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
