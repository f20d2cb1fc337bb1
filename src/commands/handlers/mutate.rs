//! Mutating commands: PUT, DELETE, RENAME and CREATE. None of them run in read-only mode.

use super::{Command, ExecEnv};
use crate::commands::definitions::CommandType;
use crate::commands::output::OutputLog;
use crate::error::{Result, ShellError};
use crate::store::TableHandle;
use crate::traversal::{FoundHooks, Level, PatternFilterSet};
use tracing::{info, warn};

/// Writes a single cell.
#[derive(Debug, Default)]
pub struct Put;

impl FoundHooks for Put {}

impl Command for Put {
    fn command_type(&self) -> CommandType {
        CommandType::Put
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["p"]
    }

    fn description(&self) -> &'static str {
        "Write a single cell"
    }

    fn usage(&self) -> &'static str {
        "put table row family qualifier value"
    }

    fn example(&self) -> &'static str {
        "put user alice info city paris"
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count == 5
    }

    fn assign_params(&self, _args: &[String]) -> Result<PatternFilterSet> {
        Ok(PatternFilterSet::default())
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        let [table, row, family, qualifier, value] = env.args else {
            return Err(ShellError::argument("put expects exactly 5 arguments"));
        };

        let handle = env.store.open_table(table)?;
        handle.put(row, family, qualifier, value)?;
        info!(%table, %row, %family, %qualifier, "Cell written");
        env.out.info(format!("{table}/{row}/{family}:{qualifier} = {value}"));
        Ok(())
    }
}

/// Deletes matching rows, families or cells, after confirmation.
#[derive(Debug, Default)]
pub struct Delete {
    deleted: u64,
}

impl FoundHooks for Delete {
    fn found_row(&mut self, table: &dyn TableHandle, row: &str, _out: &mut OutputLog) -> Result<()> {
        table.delete_row(row)?;
        self.deleted += 1;
        Ok(())
    }

    fn found_family(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        _out: &mut OutputLog,
    ) -> Result<()> {
        table.delete_family(row, family)?;
        self.deleted += 1;
        Ok(())
    }

    fn found_qualifier(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        _out: &mut OutputLog,
    ) -> Result<()> {
        table.delete_cell(row, family, qualifier)?;
        self.deleted += 1;
        Ok(())
    }

    fn found_value(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        _value: &str,
        _out: &mut OutputLog,
    ) -> Result<()> {
        table.delete_cell(row, family, qualifier)?;
        self.deleted += 1;
        Ok(())
    }
}

impl Command for Delete {
    fn command_type(&self) -> CommandType {
        CommandType::Delete
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["del", "d", "reg_delete", "rd"]
    }

    fn description(&self) -> &'static str {
        "Delete matching rows, families or cells"
    }

    fn usage(&self) -> &'static str {
        "delete table row [family [qualifier [value]]]"
    }

    fn example(&self) -> &'static str {
        "delete user ^tmp_ info"
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn check_arg_count(&self, count: usize) -> bool {
        (2..=5).contains(&count)
    }

    fn level(&self, args: &[String]) -> Option<Level> {
        Some(Level::from_arg_count(args.len()))
    }

    fn needs_confirm(&self) -> bool {
        true
    }

    fn notify_enabled(&self) -> bool {
        true
    }

    fn finish(&mut self, out: &mut OutputLog) {
        info!(deleted = self.deleted, "Delete finished");
        out.info(format!("{} deleted", self.deleted));
    }
}

/// Moves matching cells to a new qualifier, after confirmation.
#[derive(Debug, Default)]
pub struct Rename {
    target: String,
    renamed: u64,
}

impl FoundHooks for Rename {
    fn found_qualifier(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        if qualifier == self.target {
            return Ok(());
        }
        if table.exists(row, family, &self.target)? {
            warn!(%row, %family, target = %self.target, "Rename target exists");
            out.error(format!(
                "{row}/{family}:{} already exists, {qualifier} kept",
                self.target
            ));
            return Ok(());
        }
        let Some(value) = table.get(row, family, qualifier)? else {
            return Ok(());
        };

        table.put(row, family, &self.target, &value)?;
        table.delete_cell(row, family, qualifier)?;
        self.renamed += 1;
        Ok(())
    }
}

impl Command for Rename {
    fn command_type(&self) -> CommandType {
        CommandType::Rename
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ren"]
    }

    fn description(&self) -> &'static str {
        "Move matching cells to a new qualifier"
    }

    fn usage(&self) -> &'static str {
        "rename table row family qualifier new_qualifier"
    }

    fn example(&self) -> &'static str {
        "rename user . info ^town$ city"
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count == 5
    }

    fn bind_args(&mut self, args: &[String]) -> Result<()> {
        let Some(target) = args.get(4).filter(|t| !t.is_empty()) else {
            return Err(ShellError::argument("rename expects a non-empty new qualifier"));
        };
        self.target = target.clone();
        Ok(())
    }

    fn assign_params(&self, args: &[String]) -> Result<PatternFilterSet> {
        PatternFilterSet::from_args(&args[..args.len().min(4)])
    }

    fn level(&self, _args: &[String]) -> Option<Level> {
        Some(Level::Qualifier)
    }

    fn needs_confirm(&self) -> bool {
        true
    }

    fn notify_enabled(&self) -> bool {
        true
    }

    fn finish(&mut self, out: &mut OutputLog) {
        info!(renamed = self.renamed, target = %self.target, "Rename finished");
        out.info(format!("{} renamed", self.renamed));
    }
}

/// Creates a table with the given column families.
#[derive(Debug, Default)]
pub struct Create;

impl FoundHooks for Create {}

impl Command for Create {
    fn command_type(&self) -> CommandType {
        CommandType::Create
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["cr"]
    }

    fn description(&self) -> &'static str {
        "Create a table with one or more column families"
    }

    fn usage(&self) -> &'static str {
        "create table family [family ...]"
    }

    fn example(&self) -> &'static str {
        "create user info stats"
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn check_arg_count(&self, count: usize) -> bool {
        count >= 2
    }

    fn assign_params(&self, _args: &[String]) -> Result<PatternFilterSet> {
        Ok(PatternFilterSet::default())
    }

    fn traverses(&self) -> bool {
        false
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        let Some((table, families)) = env.args.split_first() else {
            return Err(ShellError::argument("create expects a table name"));
        };

        env.store.create_table(table, families)?;
        info!(%table, ?families, "Table created");
        env.out
            .info(format!("Table '{table}' created with families: {}", families.join(", ")));
        Ok(())
    }
}
