//! Seed file format for the in-memory store.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level seed document: tables keyed by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub tables: BTreeMap<String, TableSeed>,
}

/// Seed content of one table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSeed {
    /// Declared column families.
    #[serde(default)]
    pub families: Vec<String>,

    /// row → family → qualifier → value
    #[serde(default)]
    pub rows: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,

    /// Generated chunk series, for seeding large split values.
    #[serde(default)]
    pub chunks: Vec<ChunkSeed>,
}

/// A contiguous chunk series `<prefix><first>` .. `<prefix><first + count - 1>`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkSeed {
    pub row: String,
    pub family: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub first: u64,
    pub count: u64,
}

fn default_prefix() -> String {
    "f".to_string()
}
