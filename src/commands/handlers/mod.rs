//! Command variants and the trait they implement.
//!
//! Every command shares the lifecycle driven by the shell; a variant only
//! declares its metadata, arity, target level and flags, and either relies on
//! the standard traversal (reacting through [`FoundHooks`]) or runs its own body
//! in [`Command::execute`].

pub mod browse;
pub mod mutate;
pub mod system;

use super::definitions::CommandType;
use super::output::OutputLog;
use crate::error::Result;
use crate::store::StoreClient;
use crate::traversal::{FoundHooks, Level, PatternFilterSet};

/// Session state shared across commands.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Rejects commands that are not read-only.
    pub readonly: bool,
    /// Set by QUIT; the shell loop exits after the current command.
    pub quit_requested: bool,
    /// Command lines entered so far.
    pub history: Vec<String>,
}

/// Context handed to commands that run their own body.
pub struct ExecEnv<'a> {
    pub store: &'a dyn StoreClient,
    pub out: &'a mut OutputLog,
    pub session: &'a mut Session,
    pub args: &'a [String],
    pub filters: &'a PatternFilterSet,
}

/// A shell command.
#[allow(unused_variables)]
pub trait Command: FoundHooks {
    fn command_type(&self) -> CommandType;

    /// Alternative names, lowercase. The canonical name is always accepted.
    fn aliases(&self) -> &'static [&'static str];

    fn description(&self) -> &'static str;

    fn usage(&self) -> &'static str;

    fn example(&self) -> &'static str;

    /// Whether the command may run in read-only mode. Mutating commands override.
    fn is_read_only(&self) -> bool {
        true
    }

    fn check_arg_count(&self, count: usize) -> bool;

    /// Keeps arguments the command needs beyond the filters, such as a target
    /// name. Called once the argument count is checked.
    fn bind_args(&mut self, args: &[String]) -> Result<()> {
        Ok(())
    }

    /// Builds the filter set from the positional arguments.
    fn assign_params(&self, args: &[String]) -> Result<PatternFilterSet> {
        PatternFilterSet::from_args(args)
    }

    /// Level the command reports at, if it traverses.
    fn level(&self, args: &[String]) -> Option<Level> {
        None
    }

    /// Row key to look up directly instead of scanning rows.
    fn exact_row(&self, args: &[String]) -> Option<String> {
        None
    }

    fn needs_confirm(&self) -> bool {
        false
    }

    fn notify_enabled(&self) -> bool {
        false
    }

    /// Whether traversal hits are printed.
    fn to_output(&self) -> bool {
        true
    }

    /// Whether the command runs the standard traversal. Otherwise
    /// [`execute`](Self::execute) is called.
    fn traverses(&self) -> bool {
        true
    }

    /// Command-specific body, for commands that do not traverse.
    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a traversal completes or stops at the row limit.
    fn finish(&mut self, out: &mut OutputLog) {}
}
