//! In-memory store client.
//!
//! Backs the shell when no remote store is configured and serves as the
//! collaborator in tests. Every collaborator call is counted, and open table
//! handles are tracked so that leaks are observable.

use super::seed::SeedFile;
use super::{chunk_index, chunk_qualifier, ScanFilter, StoreClient, TableHandle};
use crate::error::{Result, ShellError};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

type Cells = BTreeMap<String, String>;
type Families = BTreeMap<String, Cells>;

#[derive(Debug, Default)]
struct MemoryTable {
    families: Vec<String>,
    rows: BTreeMap<String, Families>,
}

/// A single-threaded in-memory wide-column store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<BTreeMap<String, MemoryTable>>,
    calls: Cell<usize>,
    open_handles: Cell<usize>,
    failing_op: RefCell<Option<&'static str>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed TOML text.
    pub fn from_seed_str(content: &str) -> Result<Self> {
        let seed: SeedFile = toml::from_str(content)
            .map_err(|e| ShellError::config(format!("Invalid seed file: {e}")))?;
        let store = Self::new();
        store.apply_seed(&seed);
        Ok(store)
    }

    /// Builds a store from a seed file on disk.
    pub fn load_seed(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::config(format!("Failed to read seed file {}: {e}", path.display()))
        })?;
        Self::from_seed_str(&content)
    }

    fn apply_seed(&self, seed: &SeedFile) {
        for (name, table) in &seed.tables {
            self.insert_table(name, &table.families);
            for (row, families) in &table.rows {
                for (family, cells) in families {
                    for (qualifier, value) in cells {
                        self.insert(name, row, family, qualifier, value);
                    }
                }
            }
            for chunks in &table.chunks {
                for index in chunks.first..chunks.first + chunks.count {
                    let value = format!("{}:{}", chunks.row, index);
                    let qualifier = chunk_qualifier(&chunks.prefix, index);
                    self.insert(name, &chunks.row, &chunks.family, &qualifier, &value);
                }
            }
        }
        debug!(tables = seed.tables.len(), "Seeded in-memory store");
    }

    /// Creates (or extends) a table without counting it as a collaborator call.
    pub fn insert_table(&self, name: &str, families: &[String]) {
        let mut tables = self.tables.borrow_mut();
        let table = tables.entry(name.to_string()).or_default();
        for family in families {
            if !table.families.contains(family) {
                table.families.push(family.clone());
            }
        }
    }

    /// Writes a cell without counting it as a collaborator call.
    ///
    /// Missing tables and families are declared on the fly.
    pub fn insert(&self, table: &str, row: &str, family: &str, qualifier: &str, value: &str) {
        self.insert_table(table, &[family.to_string()]);
        let mut tables = self.tables.borrow_mut();
        if let Some(t) = tables.get_mut(table) {
            t.rows
                .entry(row.to_string())
                .or_default()
                .entry(family.to_string())
                .or_default()
                .insert(qualifier.to_string(), value.to_string());
        }
    }

    /// Reads a cell without counting it as a collaborator call.
    pub fn peek(&self, table: &str, row: &str, family: &str, qualifier: &str) -> Option<String> {
        self.tables
            .borrow()
            .get(table)?
            .rows
            .get(row)?
            .get(family)?
            .get(qualifier)
            .cloned()
    }

    /// Returns the number of collaborator calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    /// Resets the collaborator call counter.
    pub fn reset_call_count(&self) {
        self.calls.set(0);
    }

    /// Returns the number of table handles currently open.
    pub fn open_handles(&self) -> usize {
        self.open_handles.get()
    }

    /// Makes every subsequent call of the named operation fail.
    pub fn fail_on(&self, op: &'static str) {
        *self.failing_op.borrow_mut() = Some(op);
    }

    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if *self.failing_op.borrow() == Some(op) {
            return Err(ShellError::store(format!("{op} failed: injected failure")));
        }
        Ok(())
    }

    fn with_table<T>(&self, name: &str, f: impl FnOnce(&MemoryTable) -> T) -> Result<T> {
        let tables = self.tables.borrow();
        let table = tables
            .get(name)
            .ok_or_else(|| ShellError::store(format!("Table '{name}' does not exist")))?;
        Ok(f(table))
    }

    fn with_table_mut<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut MemoryTable) -> Result<T>,
    ) -> Result<T> {
        let mut tables = self.tables.borrow_mut();
        let table = tables
            .get_mut(name)
            .ok_or_else(|| ShellError::store(format!("Table '{name}' does not exist")))?;
        f(table)
    }
}

impl StoreClient for MemoryStore {
    fn list_tables(&self) -> Result<Vec<String>> {
        self.record("list_tables")?;
        Ok(self.tables.borrow().keys().cloned().collect())
    }

    fn open_table<'a>(&'a self, name: &str) -> Result<Box<dyn TableHandle + 'a>> {
        self.record("open_table")?;
        self.with_table(name, |_| ())?;
        self.open_handles.set(self.open_handles.get() + 1);
        Ok(Box::new(MemoryTableHandle {
            store: self,
            name: name.to_string(),
        }))
    }

    fn create_table(&self, name: &str, families: &[String]) -> Result<()> {
        self.record("create_table")?;
        if self.tables.borrow().contains_key(name) {
            return Err(ShellError::store(format!("Table '{name}' already exists")));
        }
        self.insert_table(name, families);
        Ok(())
    }
}

/// Handle on one table of a [`MemoryStore`].
struct MemoryTableHandle<'a> {
    store: &'a MemoryStore,
    name: String,
}

impl Drop for MemoryTableHandle<'_> {
    fn drop(&mut self) {
        let open = self.store.open_handles.get();
        self.store.open_handles.set(open.saturating_sub(1));
    }
}

impl MemoryTableHandle<'_> {
    fn row<T>(&self, row: &str, f: impl FnOnce(Option<&Families>) -> T) -> Result<T> {
        self.store.with_table(&self.name, |t| f(t.rows.get(row)))
    }
}

impl TableHandle for MemoryTableHandle<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn declared_families(&self) -> Result<Vec<String>> {
        self.store.record("declared_families")?;
        self.store.with_table(&self.name, |t| t.families.clone())
    }

    fn list_rows(&self) -> Result<Vec<String>> {
        self.store.record("list_rows")?;
        self.store
            .with_table(&self.name, |t| t.rows.keys().cloned().collect())
    }

    fn row_exists(&self, row: &str) -> Result<bool> {
        self.store.record("row_exists")?;
        self.row(row, |r| r.is_some())
    }

    fn list_families(&self, row: &str) -> Result<Vec<String>> {
        self.store.record("list_families")?;
        self.row(row, |r| r.map(|f| f.keys().cloned().collect()).unwrap_or_default())
    }

    fn scan(
        &self,
        row: &str,
        family: &str,
        filter: &ScanFilter<'_>,
    ) -> Result<Vec<(String, String)>> {
        self.store.record("scan")?;
        self.row(row, |r| {
            r.and_then(|f| f.get(family))
                .map(|cells| {
                    cells
                        .iter()
                        .filter(|(q, v)| filter.accepts(q, v))
                        .map(|(q, v)| (q.clone(), v.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    fn get(&self, row: &str, family: &str, qualifier: &str) -> Result<Option<String>> {
        self.store.record("get")?;
        self.row(row, |r| {
            r.and_then(|f| f.get(family))
                .and_then(|cells| cells.get(qualifier))
                .cloned()
        })
    }

    fn exists(&self, row: &str, family: &str, qualifier: &str) -> Result<bool> {
        self.store.record("exists")?;
        self.row(row, |r| {
            r.and_then(|f| f.get(family))
                .is_some_and(|cells| cells.contains_key(qualifier))
        })
    }

    fn first_chunk(&self, row: &str, family: &str, prefix: &str) -> Result<Option<(u64, String)>> {
        self.store.record("first_chunk")?;
        self.row(row, |r| {
            r.and_then(|f| f.get(family)).and_then(|cells| {
                cells
                    .iter()
                    .filter_map(|(q, v)| chunk_index(prefix, q).map(|i| (i, v.clone())))
                    .min_by_key(|(i, _)| *i)
            })
        })
    }

    fn put(&self, row: &str, family: &str, qualifier: &str, value: &str) -> Result<()> {
        self.store.record("put")?;
        self.store.with_table_mut(&self.name, |t| {
            if !t.families.iter().any(|f| f == family) {
                return Err(ShellError::store(format!(
                    "Column family '{family}' does not exist in table '{}'",
                    self.name
                )));
            }
            t.rows
                .entry(row.to_string())
                .or_default()
                .entry(family.to_string())
                .or_default()
                .insert(qualifier.to_string(), value.to_string());
            Ok(())
        })
    }

    fn delete_row(&self, row: &str) -> Result<()> {
        self.store.record("delete_row")?;
        self.store.with_table_mut(&self.name, |t| {
            t.rows.remove(row);
            Ok(())
        })
    }

    fn delete_family(&self, row: &str, family: &str) -> Result<()> {
        self.store.record("delete_family")?;
        self.store.with_table_mut(&self.name, |t| {
            if let Some(families) = t.rows.get_mut(row) {
                families.remove(family);
                if families.is_empty() {
                    t.rows.remove(row);
                }
            }
            Ok(())
        })
    }

    fn delete_cell(&self, row: &str, family: &str, qualifier: &str) -> Result<()> {
        self.store.record("delete_cell")?;
        self.store.with_table_mut(&self.name, |t| {
            if let Some(families) = t.rows.get_mut(row) {
                if let Some(cells) = families.get_mut(family) {
                    cells.remove(qualifier);
                    if cells.is_empty() {
                        families.remove(family);
                    }
                }
                if families.is_empty() {
                    t.rows.remove(row);
                }
            }
            Ok(())
        })
    }
}
