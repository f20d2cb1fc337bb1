//! Per-level pattern filters.

use crate::error::{Result, ShellError};
use regex::Regex;
use std::fmt;

/// A rung of the store's key hierarchy.
///
/// The derived ordering follows the hierarchy: `Table < Row < ... < Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Table,
    Row,
    Family,
    Qualifier,
    Value,
    /// Command-specific parameter outside the hierarchy.
    Other,
}

impl Level {
    /// The traversable levels, in positional argument order.
    pub const HIERARCHY: [Level; 5] = [
        Level::Table,
        Level::Row,
        Level::Family,
        Level::Qualifier,
        Level::Value,
    ];

    /// Returns the level addressed by the last of `count` positional filters.
    pub fn from_arg_count(count: usize) -> Level {
        match count {
            0 | 1 => Level::Table,
            2 => Level::Row,
            3 => Level::Family,
            4 => Level::Qualifier,
            _ => Level::Value,
        }
    }

    /// Nesting depth below the table level, used for indentation.
    pub fn depth(self) -> usize {
        self as usize
    }

    fn index(self) -> usize {
        self as usize
    }

    fn param_label(self) -> &'static str {
        match self {
            Level::Table => "param-Table     ",
            Level::Row => "param-RowKey    ",
            Level::Family => "param-Family    ",
            Level::Qualifier => "param-Qualifier ",
            Level::Value => "param-Value     ",
            Level::Other => "param-Other     ",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Table => "TABLE",
            Level::Row => "ROW",
            Level::Family => "FAMILY",
            Level::Qualifier => "QUALIFIER",
            Level::Value => "VALUE",
            Level::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// Optional compiled pattern per level.
///
/// Built once when a command's arguments are parsed and read-only afterwards.
/// A level without a pattern matches everything.
#[derive(Debug, Clone, Default)]
pub struct PatternFilterSet {
    patterns: [Option<Regex>; 6],
}

impl PatternFilterSet {
    /// Compiles up to five positional patterns (table, row, family, qualifier, value).
    ///
    /// Positions beyond the fifth are ignored.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut set = Self::default();
        for (level, pattern) in Level::HIERARCHY.iter().zip(args) {
            set.set(*level, pattern)?;
        }
        Ok(set)
    }

    /// Compiles and stores the pattern for one level.
    pub fn set(&mut self, level: Level, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|e| {
            ShellError::argument(format!("Invalid {level} pattern '{pattern}': {e}"))
        })?;
        self.patterns[level.index()] = Some(regex);
        Ok(())
    }

    /// Returns the pattern for a level, if any.
    pub fn get(&self, level: Level) -> Option<&Regex> {
        self.patterns[level.index()].as_ref()
    }

    /// Returns true if any of the given levels carries a pattern.
    pub fn has_any(&self, levels: &[Level]) -> bool {
        levels.iter().any(|l| self.get(*l).is_some())
    }

    /// Searches for the level's pattern anywhere in `target`.
    pub fn matches(&self, level: Level, target: &str) -> bool {
        self.get(level).map_or(true, |re| re.is_match(target))
    }

    /// Returns the deepest hierarchy level that carries a pattern.
    pub fn deepest(&self) -> Option<Level> {
        Level::HIERARCHY
            .iter()
            .rev()
            .find(|l| self.get(**l).is_some())
            .copied()
    }

    /// Formats the parameter echo lines for every configured level.
    pub fn summary_lines(&self) -> Vec<String> {
        Level::HIERARCHY
            .iter()
            .chain(std::iter::once(&Level::Other))
            .filter_map(|l| {
                self.get(*l)
                    .map(|re| format!("{}: {}", l.param_label(), re.as_str()))
            })
            .collect()
    }
}
