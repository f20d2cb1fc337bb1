//! Error types for colshell.
//!
//! Defines the main error enum used throughout the shell.

use thiserror::Error;

/// Main error type for shell operations.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The command token did not resolve to any known alias.
    #[error("Undefined command '{0}'")]
    CommandNotFound(String),

    /// Wrong argument count, malformed filter pattern, bad row limit, etc.
    #[error("Argument error: {0}")]
    Argument(String),

    /// A mutating command was attempted while the shell is read-only.
    #[error("Non-readonly command {0} not allowed in readonly mode\nEnter 'help readonly' for more information")]
    ReadonlyViolation(String),

    /// Failures surfaced by the store collaborator (missing table, rejected write, etc.)
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration errors (invalid config file, unreadable seed file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Creates a command-not-found error, uppercasing the offending token.
    pub fn command_not_found(token: &str) -> Self {
        Self::CommandNotFound(token.to_uppercase())
    }

    /// Creates an argument error with the given message.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Creates a store error with the given message.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::CommandNotFound(_) => "Command Error",
            Self::Argument(_) => "Argument Error",
            Self::ReadonlyViolation(_) => "Readonly Error",
            Self::Store(_) => "Store Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using ShellError.
pub type Result<T> = std::result::Result<T, ShellError>;
