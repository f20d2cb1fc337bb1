//! Read-only browsing commands: LIST, SCAN, GET, COUNT, FILTER and DESCRIBE.

use super::Command;
use crate::commands::definitions::CommandType;
use crate::commands::output::OutputLog;
use crate::error::Result;
use crate::store::{ScanFilter, TableHandle};
use crate::traversal::{FoundHooks, Level, PatternFilterSet};

/// Lists names down to the level addressed by the arguments.
#[derive(Debug, Default)]
pub struct List;

impl FoundHooks for List {}

impl Command for List {
    fn command_type(&self) -> CommandType {
        CommandType::List
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["l", "ls"]
    }

    fn description(&self) -> &'static str {
        "List tables, rows, families or qualifiers matching the given patterns"
    }

    fn usage(&self) -> &'static str {
        "list [table [row [family [qualifier [value]]]]]"
    }

    fn example(&self) -> &'static str {
        "list user ^2024"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 5
    }

    fn level(&self, args: &[String]) -> Option<Level> {
        Some(Level::from_arg_count(args.len()))
    }
}

/// Prints every matching cell with its value.
#[derive(Debug, Default)]
pub struct Scan;

impl FoundHooks for Scan {}

impl Command for Scan {
    fn command_type(&self) -> CommandType {
        CommandType::Scan
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["s"]
    }

    fn description(&self) -> &'static str {
        "Print matching cells down to their values"
    }

    fn usage(&self) -> &'static str {
        "scan [table [row [family [qualifier [value]]]]]"
    }

    fn example(&self) -> &'static str {
        "scan10 user . info ^name$"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 5
    }

    fn level(&self, _args: &[String]) -> Option<Level> {
        Some(Level::Value)
    }
}

/// Reads one row by exact key.
#[derive(Debug, Default)]
pub struct Get;

impl FoundHooks for Get {}

impl Command for Get {
    fn command_type(&self) -> CommandType {
        CommandType::Get
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["g"]
    }

    fn description(&self) -> &'static str {
        "Read one row by its exact key"
    }

    fn usage(&self) -> &'static str {
        "get table row [family [qualifier [value]]]"
    }

    fn example(&self) -> &'static str {
        "get user alice info"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        (2..=5).contains(&count)
    }

    fn assign_params(&self, args: &[String]) -> Result<PatternFilterSet> {
        let mut filters = PatternFilterSet::from_args(args)?;
        if let Some(row) = args.get(1) {
            filters.set(Level::Row, &format!("^{}$", regex::escape(row)))?;
        }
        Ok(filters)
    }

    fn level(&self, args: &[String]) -> Option<Level> {
        Some(Level::from_arg_count(args.len()))
    }

    fn exact_row(&self, args: &[String]) -> Option<String> {
        args.get(1).cloned()
    }

    fn notify_enabled(&self) -> bool {
        true
    }
}

/// Counts matching rows.
#[derive(Debug, Default)]
pub struct Count {
    rows: u64,
}

impl FoundHooks for Count {
    fn found_row(&mut self, _table: &dyn TableHandle, _row: &str, _out: &mut OutputLog) -> Result<()> {
        self.rows += 1;
        Ok(())
    }
}

impl Command for Count {
    fn command_type(&self) -> CommandType {
        CommandType::Count
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["c"]
    }

    fn description(&self) -> &'static str {
        "Count rows holding at least one matching cell"
    }

    fn usage(&self) -> &'static str {
        "count [table [row [family [qualifier [value]]]]]"
    }

    fn example(&self) -> &'static str {
        "count user . info city paris"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 5
    }

    fn level(&self, _args: &[String]) -> Option<Level> {
        Some(Level::Row)
    }

    fn notify_enabled(&self) -> bool {
        true
    }

    fn to_output(&self) -> bool {
        false
    }

    fn finish(&mut self, out: &mut OutputLog) {
        out.info(format!("{} row(s)", self.rows));
    }
}

/// Prints whole rows that hold at least one matching cell.
#[derive(Debug, Default)]
pub struct Filter {
    rows: u64,
}

impl FoundHooks for Filter {
    fn found_row(&mut self, table: &dyn TableHandle, row: &str, out: &mut OutputLog) -> Result<()> {
        self.rows += 1;
        out.info(format!("{}/{row}", table.name()));
        for family in table.list_families(row)? {
            for (qualifier, value) in table.scan(row, &family, &ScanFilter::default())? {
                out.info(format!("  {family}:{qualifier} = {value}"));
            }
        }
        Ok(())
    }
}

impl Command for Filter {
    fn command_type(&self) -> CommandType {
        CommandType::Filter
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["fi"]
    }

    fn description(&self) -> &'static str {
        "Print every cell of rows holding a matching cell"
    }

    fn usage(&self) -> &'static str {
        "filter [table [row [family [qualifier [value]]]]]"
    }

    fn example(&self) -> &'static str {
        "filter user . info city ^paris$"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 5
    }

    fn level(&self, _args: &[String]) -> Option<Level> {
        Some(Level::Row)
    }

    fn notify_enabled(&self) -> bool {
        true
    }

    fn to_output(&self) -> bool {
        false
    }

    fn finish(&mut self, out: &mut OutputLog) {
        out.info(format!("{} row(s) matched", self.rows));
    }
}

/// Shows the column families declared on matching tables.
#[derive(Debug, Default)]
pub struct Describe;

impl FoundHooks for Describe {
    fn found_table(&mut self, table: &dyn TableHandle, out: &mut OutputLog) -> Result<()> {
        let families = table.declared_families()?;
        out.info(format!("  families: {}", families.join(", ")));
        Ok(())
    }
}

impl Command for Describe {
    fn command_type(&self) -> CommandType {
        CommandType::Describe
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["desc"]
    }

    fn description(&self) -> &'static str {
        "Show the column families of matching tables"
    }

    fn usage(&self) -> &'static str {
        "describe [table]"
    }

    fn example(&self) -> &'static str {
        "describe ^user$"
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count <= 1
    }

    fn level(&self, _args: &[String]) -> Option<Level> {
        Some(Level::Table)
    }

    fn notify_enabled(&self) -> bool {
        true
    }
}
