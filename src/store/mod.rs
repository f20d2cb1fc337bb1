//! Store abstraction layer for colshell.
//!
//! The shell talks to a wide-column store through two traits: [`StoreClient`]
//! for store-wide operations and [`TableHandle`] for everything scoped to one
//! table. All calls are synchronous and block the caller.

mod memory;
mod seed;

pub use memory::MemoryStore;
pub use seed::{ChunkSeed, SeedFile, TableSeed};

use crate::error::Result;
use regex::Regex;

/// Store-side filter applied while scanning the cells of one family.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanFilter<'a> {
    /// Keep only qualifiers this pattern finds a match in.
    pub qualifier: Option<&'a Regex>,
    /// Keep only values this pattern finds a match in.
    pub value: Option<&'a Regex>,
    /// Leave out chunk qualifiers with this prefix; they are located separately.
    pub skip_chunks: Option<&'a str>,
}

impl ScanFilter<'_> {
    /// Returns true if the cell passes every configured condition.
    pub fn accepts(&self, qualifier: &str, value: &str) -> bool {
        if let Some(prefix) = self.skip_chunks {
            if chunk_index(prefix, qualifier).is_some() {
                return false;
            }
        }
        self.qualifier.map_or(true, |re| re.is_match(qualifier))
            && self.value.map_or(true, |re| re.is_match(value))
    }
}

/// Store-wide operations.
pub trait StoreClient {
    /// Lists table names in store order.
    fn list_tables(&self) -> Result<Vec<String>>;

    /// Opens a handle on an existing table. The handle is released on drop.
    fn open_table<'a>(&'a self, name: &str) -> Result<Box<dyn TableHandle + 'a>>;

    /// Creates a table with the given column families.
    fn create_table(&self, name: &str, families: &[String]) -> Result<()>;
}

/// Operations scoped to one open table.
pub trait TableHandle {
    /// Returns the table name.
    fn name(&self) -> &str;

    /// Returns the column families declared on the table.
    fn declared_families(&self) -> Result<Vec<String>>;

    /// Lists row keys in store order.
    fn list_rows(&self) -> Result<Vec<String>>;

    /// Returns true if the row holds at least one cell.
    fn row_exists(&self, row: &str) -> Result<bool>;

    /// Lists the families holding cells in the row.
    fn list_families(&self, row: &str) -> Result<Vec<String>>;

    /// Returns the `(qualifier, value)` cells of one family that pass `filter`.
    fn scan(&self, row: &str, family: &str, filter: &ScanFilter<'_>)
        -> Result<Vec<(String, String)>>;

    /// Reads a single cell.
    fn get(&self, row: &str, family: &str, qualifier: &str) -> Result<Option<String>>;

    /// Checks a single cell for existence without reading its value.
    fn exists(&self, row: &str, family: &str, qualifier: &str) -> Result<bool>;

    /// Returns the lowest-indexed chunk `(index, value)` with the given prefix.
    fn first_chunk(&self, row: &str, family: &str, prefix: &str) -> Result<Option<(u64, String)>>;

    /// Writes a single cell.
    fn put(&self, row: &str, family: &str, qualifier: &str, value: &str) -> Result<()>;

    /// Deletes a whole row.
    fn delete_row(&self, row: &str) -> Result<()>;

    /// Deletes every cell of one family in a row.
    fn delete_family(&self, row: &str, family: &str) -> Result<()>;

    /// Deletes a single cell.
    fn delete_cell(&self, row: &str, family: &str, qualifier: &str) -> Result<()>;
}

/// Builds the qualifier of chunk `index`.
pub fn chunk_qualifier(prefix: &str, index: u64) -> String {
    format!("{prefix}{index}")
}

/// Parses the chunk index out of a qualifier, if it is `<prefix><digits>`.
pub fn chunk_index(prefix: &str, qualifier: &str) -> Option<u64> {
    let digits = qualifier.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
