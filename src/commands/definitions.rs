//! Command registry.
//!
//! Maps each [`CommandType`] to a factory, and builds the alias table the
//! router resolves command tokens against. The alias table is built once, on
//! first lookup, by instantiating every command and collecting its aliases.

use super::handlers::browse::{Count, Describe, Filter, Get, List, Scan};
use super::handlers::mutate::{Create, Delete, Put, Rename};
use super::handlers::system::{Clear, Help, History, Quit, Readonly, Version};
use super::handlers::Command;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Every command the shell knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Clear,
    Count,
    Create,
    Delete,
    Describe,
    Filter,
    Get,
    Help,
    History,
    List,
    Put,
    Quit,
    Readonly,
    Rename,
    Scan,
    Version,
}

/// Creates a fresh command instance.
pub type CommandFactory = fn() -> Box<dyn Command>;

fn make<C: Command + Default + 'static>() -> Box<dyn Command> {
    Box::<C>::default()
}

impl CommandType {
    /// All command types, in help order.
    pub const ALL: [CommandType; 16] = [
        CommandType::Clear,
        CommandType::Count,
        CommandType::Create,
        CommandType::Delete,
        CommandType::Describe,
        CommandType::Filter,
        CommandType::Get,
        CommandType::Help,
        CommandType::History,
        CommandType::List,
        CommandType::Put,
        CommandType::Quit,
        CommandType::Readonly,
        CommandType::Rename,
        CommandType::Scan,
        CommandType::Version,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Count => "count",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Describe => "describe",
            Self::Filter => "filter",
            Self::Get => "get",
            Self::Help => "help",
            Self::History => "history",
            Self::List => "list",
            Self::Put => "put",
            Self::Quit => "quit",
            Self::Readonly => "readonly",
            Self::Rename => "rename",
            Self::Scan => "scan",
            Self::Version => "version",
        }
    }

    /// Returns the factory for this command type.
    pub fn factory(self) -> CommandFactory {
        match self {
            Self::Clear => make::<Clear>,
            Self::Count => make::<Count>,
            Self::Create => make::<Create>,
            Self::Delete => make::<Delete>,
            Self::Describe => make::<Describe>,
            Self::Filter => make::<Filter>,
            Self::Get => make::<Get>,
            Self::Help => make::<Help>,
            Self::History => make::<History>,
            Self::List => make::<List>,
            Self::Put => make::<Put>,
            Self::Quit => make::<Quit>,
            Self::Readonly => make::<Readonly>,
            Self::Rename => make::<Rename>,
            Self::Scan => make::<Scan>,
            Self::Version => make::<Version>,
        }
    }

    /// Creates a fresh instance of this command.
    pub fn instantiate(self) -> Box<dyn Command> {
        (self.factory())()
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

static ALIASES: Lazy<HashMap<String, CommandType>> = Lazy::new(build_alias_table);

fn build_alias_table() -> HashMap<String, CommandType> {
    let mut table = HashMap::new();
    for command_type in CommandType::ALL {
        register(&mut table, command_type, command_type.instantiate().as_ref());
    }
    debug!(entries = table.len(), "Alias table built");
    table
}

fn register(table: &mut HashMap<String, CommandType>, command_type: CommandType, command: &dyn Command) {
    let aliases = command.aliases();
    if aliases.is_empty() {
        warn!(command = %command_type, "Command declares no aliases");
    }

    for alias in aliases {
        let alias = alias.to_lowercase();
        if let Some(previous) = table.insert(alias.clone(), command_type) {
            if previous != command_type {
                warn!(%alias, %previous, current = %command_type, "Alias redefined");
            }
        }
    }
    table.insert(command_type.name().to_string(), command_type);
}

/// Resolves a command name or alias, case-insensitively.
pub fn lookup(name: &str) -> Option<CommandType> {
    ALIASES.get(&name.to_lowercase()).copied()
}
