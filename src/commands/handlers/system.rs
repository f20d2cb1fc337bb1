//! Shell commands that do not touch the store: CLEAR, HELP, HISTORY, QUIT, READONLY, VERSION.

use super::{Command, ExecEnv};
use crate::commands::definitions::{self, CommandType};
use crate::commands::help;
use crate::error::{Result, ShellError};
use crate::traversal::{FoundHooks, Level, PatternFilterSet};
use tracing::info;

/// Clears the terminal.
#[derive(Debug, Default)]
pub struct Clear;

impl FoundHooks for Clear {}

impl Command for Clear {
    fn command_type(&self) -> CommandType {
        CommandType::Clear
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["cls"]
    }

    fn description(&self) -> &'static str {
        "Clear the screen"
    }

    fn usage(&self) -> &'static str {
        "clear"
    }

    fn example(&self) -> &'static str {
        "clear"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count == 0
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        env.out.clear_screen();
        Ok(())
    }
}

/// Lists commands, or describes one.
#[derive(Debug, Default)]
pub struct Help;

impl FoundHooks for Help {}

impl Command for Help {
    fn command_type(&self) -> CommandType {
        CommandType::Help
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["h", "?"]
    }

    fn description(&self) -> &'static str {
        "Show available commands, or details on one"
    }

    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn example(&self) -> &'static str {
        "help scan"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 1
    }

    fn assign_params(&self, _args: &[String]) -> Result<PatternFilterSet> {
        Ok(PatternFilterSet::default())
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        let lines = match env.args.first() {
            None => help::overview(),
            Some(name) => {
                let command_type = definitions::lookup(name)
                    .ok_or_else(|| ShellError::command_not_found(name))?;
                help::command_help(command_type.instantiate().as_ref())
            }
        };
        for line in lines {
            env.out.info(line);
        }
        Ok(())
    }
}

/// Lists previously entered command lines.
#[derive(Debug, Default)]
pub struct History;

impl FoundHooks for History {}

impl Command for History {
    fn command_type(&self) -> CommandType {
        CommandType::History
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["his"]
    }

    fn description(&self) -> &'static str {
        "List previous commands, optionally filtered by a pattern"
    }

    fn usage(&self) -> &'static str {
        "history [pattern]"
    }

    fn example(&self) -> &'static str {
        "history ^scan"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 1
    }

    fn assign_params(&self, args: &[String]) -> Result<PatternFilterSet> {
        let mut filters = PatternFilterSet::default();
        if let Some(pattern) = args.first() {
            filters.set(Level::Other, pattern)?;
        }
        Ok(filters)
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        let entries = env
            .session
            .history
            .iter()
            .enumerate()
            .filter(|(_, line)| env.filters.matches(Level::Other, line));
        for (index, line) in entries {
            env.out.info(format!("{:>4}  {line}", index + 1));
        }
        Ok(())
    }
}

/// Leaves the shell.
#[derive(Debug, Default)]
pub struct Quit;

impl FoundHooks for Quit {}

impl Command for Quit {
    fn command_type(&self) -> CommandType {
        CommandType::Quit
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["q", "exit"]
    }

    fn description(&self) -> &'static str {
        "Leave the shell"
    }

    fn usage(&self) -> &'static str {
        "quit"
    }

    fn example(&self) -> &'static str {
        "quit"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count == 0
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        env.session.quit_requested = true;
        Ok(())
    }
}

/// Shows or changes read-only mode.
#[derive(Debug, Default)]
pub struct Readonly;

impl Readonly {
    fn parse_switch(arg: &str) -> Result<bool> {
        match arg.to_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(true),
            "off" | "false" | "no" => Ok(false),
            _ => Err(ShellError::argument(format!(
                "Invalid readonly switch '{arg}', expected on or off"
            ))),
        }
    }
}

impl FoundHooks for Readonly {}

impl Command for Readonly {
    fn command_type(&self) -> CommandType {
        CommandType::Readonly
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ro"]
    }

    fn description(&self) -> &'static str {
        "Toggle read-only mode, or set it with on/off"
    }

    fn usage(&self) -> &'static str {
        "readonly [on|off]"
    }

    fn example(&self) -> &'static str {
        "readonly off"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 1
    }

    fn assign_params(&self, _args: &[String]) -> Result<PatternFilterSet> {
        Ok(PatternFilterSet::default())
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        let readonly = match env.args.first() {
            Some(arg) => Self::parse_switch(arg)?,
            None => !env.session.readonly,
        };
        env.session.readonly = readonly;
        info!(readonly, "Readonly mode changed");
        env.out.info(format!(
            "Readonly mode: {}",
            if readonly { "ON" } else { "OFF" }
        ));
        Ok(())
    }
}

/// Prints the shell version.
#[derive(Debug, Default)]
pub struct Version;

impl FoundHooks for Version {}

impl Command for Version {
    fn command_type(&self) -> CommandType {
        CommandType::Version
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["v"]
    }

    fn description(&self) -> &'static str {
        "Print the shell version"
    }

    fn usage(&self) -> &'static str {
        "version"
    }

    fn example(&self) -> &'static str {
        "version"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count == 0
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        env.out.info(format!(
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
        Ok(())
    }
}
