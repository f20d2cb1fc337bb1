//! Command parsing and routing.
//!
//! Turns an input line into an [`Invocation`]: the resolved command type, the
//! modifiers suffixed to the command token, and the positional arguments.

use super::definitions::{self, CommandType};
use super::tokenizer::tokenize;
use crate::error::{Result, ShellError};
use crate::traversal::RowLimitGuard;
use tracing::debug;

/// Modifiers parsed off the end of a command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandToken {
    /// Token with every modifier removed.
    pub base: String,
    /// `!`: skip confirmation.
    pub forced: bool,
    /// `-`: suppress normal output.
    pub quiet: bool,
    /// Trailing digits: maximum number of rows to process.
    pub row_limit: u64,
}

impl CommandToken {
    /// Splits modifiers off a raw command token.
    ///
    /// Modifiers are stripped in a fixed order: a trailing `!`, then a trailing
    /// `-`, then trailing digits. So `scan10-!` is a forced, quiet scan limited to
    /// ten rows, while `scan-10` leaves `scan-` as the command name.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut base = raw;

        let forced = base.ends_with('!');
        if forced {
            base = &base[..base.len() - 1];
        }

        let quiet = base.ends_with('-');
        if quiet {
            base = &base[..base.len() - 1];
        }

        let name_len = base.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let row_limit = if name_len < base.len() {
            let digits = &base[name_len..];
            base = &base[..name_len];
            digits.parse::<u64>().map_err(|e| {
                ShellError::argument(format!("Invalid row limit '{digits}': {e}"))
            })?
        } else {
            RowLimitGuard::UNBOUNDED
        };

        Ok(Self {
            base: base.to_string(),
            forced,
            quiet,
            row_limit,
        })
    }
}

/// A parsed command line, ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command_type: CommandType,
    pub forced: bool,
    pub quiet: bool,
    /// Maximum rows to process; [`RowLimitGuard::UNBOUNDED`] when not given.
    pub row_limit: u64,
    pub args: Vec<String>,
}

/// Parses input lines into invocations.
pub struct CommandRouter;

impl CommandRouter {
    /// Parses a command line. Returns `None` for blank lines.
    pub fn parse(input: &str) -> Result<Option<Invocation>> {
        let mut words = tokenize(input).into_iter();
        let Some(first) = words.next() else {
            return Ok(None);
        };

        let command_type = Self::resolve(&first)?;
        let token = CommandToken::parse(&first)?;
        let invocation = Invocation {
            command_type,
            forced: token.forced,
            quiet: token.quiet,
            row_limit: token.row_limit,
            args: words.collect(),
        };
        debug!(?invocation, "Parsed command line");
        Ok(Some(invocation))
    }

    /// Resolves a raw command token, modifiers included, to its command type.
    pub fn resolve(raw: &str) -> Result<CommandType> {
        let token = CommandToken::parse(raw)?;
        definitions::lookup(&token.base).ok_or_else(|| ShellError::command_not_found(&token.base))
    }
}
