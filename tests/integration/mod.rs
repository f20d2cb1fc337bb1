//! Integration tests for colshell.
//!
//! Shared fixtures: a sample store, a shell wired to buffered output, and a
//! command wrapper recording every notification it receives.

pub mod dispatch_test;
pub mod lifecycle_test;
pub mod seed_test;
pub mod traversal_test;

use colshell::commands::handlers::{Command, ExecEnv};
use colshell::commands::{CommandType, OutputLog};
use colshell::config::Config;
use colshell::error::Result;
use colshell::shell::{AutoConfirm, Shell};
use colshell::store::{MemoryStore, TableHandle};
use colshell::traversal::{FoundHooks, Level, PatternFilterSet};

/// A small store with near misses around `t1/row1/fam1:q1 = v1`.
pub fn sample_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_table("t1", &["fam1".to_string(), "fam2".to_string()]);
    store.insert("t1", "row1", "fam1", "q1", "v1");
    store.insert("t1", "row1", "fam1", "q2", "v1");
    store.insert("t1", "row1", "fam2", "q1", "v1");
    store.insert("t1", "row2", "fam1", "q1", "v1");
    store.insert("t1", "row3", "fam2", "note", "hello");
    store.insert("t2", "k1", "meta", "owner", "dave");
    store
}

/// Shell over `store` with buffered output and fixed confirmation answers.
pub fn shell_with(store: MemoryStore, confirm: bool) -> Shell<MemoryStore> {
    Shell::new(store, &Config::default())
        .with_output(OutputLog::buffered())
        .with_confirm(Box::new(AutoConfirm(confirm)))
}

/// Records notification paths, then forwards them to the wrapped command.
pub struct Recording<C> {
    pub inner: C,
    pub found: Vec<(Level, Vec<String>)>,
}

impl<C> Recording<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            found: Vec::new(),
        }
    }

    fn record(&mut self, level: Level, names: &[&str]) {
        self.found
            .push((level, names.iter().map(|s| s.to_string()).collect()));
    }
}

impl<C: Command> FoundHooks for Recording<C> {
    fn found_table(&mut self, table: &dyn TableHandle, out: &mut OutputLog) -> Result<()> {
        self.record(Level::Table, &[table.name()]);
        self.inner.found_table(table, out)
    }

    fn found_row(&mut self, table: &dyn TableHandle, row: &str, out: &mut OutputLog) -> Result<()> {
        self.record(Level::Row, &[table.name(), row]);
        self.inner.found_row(table, row, out)
    }

    fn found_family(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        self.record(Level::Family, &[table.name(), row, family]);
        self.inner.found_family(table, row, family, out)
    }

    fn found_qualifier(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        self.record(Level::Qualifier, &[table.name(), row, family, qualifier]);
        self.inner
            .found_qualifier(table, row, family, qualifier, out)
    }

    fn found_value(
        &mut self,
        table: &dyn TableHandle,
        row: &str,
        family: &str,
        qualifier: &str,
        value: &str,
        out: &mut OutputLog,
    ) -> Result<()> {
        self.record(Level::Value, &[table.name(), row, family, qualifier, value]);
        self.inner
            .found_value(table, row, family, qualifier, value, out)
    }
}

impl<C: Command> Command for Recording<C> {
    fn command_type(&self) -> CommandType {
        self.inner.command_type()
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.inner.aliases()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn usage(&self) -> &'static str {
        self.inner.usage()
    }

    fn example(&self) -> &'static str {
        self.inner.example()
    }

    fn is_read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    fn check_arg_count(&self, count: usize) -> bool {
        self.inner.check_arg_count(count)
    }

    fn bind_args(&mut self, args: &[String]) -> Result<()> {
        self.inner.bind_args(args)
    }

    fn assign_params(&self, args: &[String]) -> Result<PatternFilterSet> {
        self.inner.assign_params(args)
    }

    fn level(&self, args: &[String]) -> Option<Level> {
        self.inner.level(args)
    }

    fn exact_row(&self, args: &[String]) -> Option<String> {
        self.inner.exact_row(args)
    }

    fn needs_confirm(&self) -> bool {
        self.inner.needs_confirm()
    }

    fn notify_enabled(&self) -> bool {
        self.inner.notify_enabled()
    }

    fn to_output(&self) -> bool {
        self.inner.to_output()
    }

    fn traverses(&self) -> bool {
        self.inner.traverses()
    }

    fn execute(&mut self, env: &mut ExecEnv<'_>) -> Result<()> {
        self.inner.execute(env)
    }

    fn finish(&mut self, out: &mut OutputLog) {
        self.inner.finish(out)
    }
}
