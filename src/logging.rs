//! Logging configuration for colshell.
//!
//! Diagnostics go through `tracing`. An interactive session logs to a file so
//! the terminal only shows the prompt and command output; batch runs (`-e`) log
//! to stderr. An explicit log file always wins.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging to the given file.
///
/// Falls back to stderr logging when the file cannot be created.
pub fn init_file_logging(log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            init_stderr_logging();
            return;
        }
    }

    // Append so that consecutive sessions keep their history
    let log_file = match File::options().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {e}");
            init_stderr_logging();
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Initializes logging to stderr.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Where diagnostics are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// Picks the destination from an explicit `--log-file` and the run mode.
    pub fn choose(log_file: Option<&Path>, interactive: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path.to_path_buf()),
            None if interactive => Self::File(default_log_path()),
            None => Self::Stderr,
        }
    }
}

/// Initializes logging for the chosen destination.
pub fn init(target: &LogTarget) {
    match target {
        LogTarget::File(path) => init_file_logging(path),
        LogTarget::Stderr => init_stderr_logging(),
    }
}

/// Returns the default path for the log file.
///
/// Uses XDG state directory on Linux (`~/.local/state/colshell/colshell.log`),
/// or falls back to config directory on other platforms.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("colshell").join("colshell.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("colshell").join("colshell.log");
    }

    std::env::temp_dir().join("colshell.log")
}
