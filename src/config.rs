//! Configuration management for colshell.
//!
//! Handles loading configuration from TOML files, with shell defaults,
//! chunked-family settings and the seed file for the in-memory store.

use crate::error::{Result, ShellError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for colshell.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Interactive shell settings.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Families holding large values split into numbered chunk columns.
    #[serde(default)]
    pub chunks: ChunkConfig,

    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Interactive shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Start the shell in read-only mode.
    #[serde(default)]
    pub readonly: bool,

    /// Prompt printed before each command line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    "colsh> ".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            readonly: false,
            prompt: default_prompt(),
        }
    }
}

/// Chunked family configuration.
///
/// A chunked family stores one logical value as qualifiers `<prefix><index>`
/// with contiguous indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Qualifier prefix preceding the chunk index.
    #[serde(default = "default_chunk_prefix")]
    pub prefix: String,

    /// Names of the families laid out as chunk series.
    #[serde(default)]
    pub families: Vec<String>,

    /// Expected chunk count per row; the first probe span of the locator.
    #[serde(default = "default_chunk_ceiling")]
    pub ceiling: u64,
}

fn default_chunk_prefix() -> String {
    "f".to_string()
}

fn default_chunk_ceiling() -> u64 {
    400
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            prefix: default_chunk_prefix(),
            families: Vec::new(),
            ceiling: default_chunk_ceiling(),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// TOML file used to seed the in-memory store.
    pub seed: Option<PathBuf>,
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("colshell")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ShellError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ShellError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;

        if config.chunks.ceiling == 0 {
            return Err(ShellError::config(format!(
                "Configuration error in {}:\n  chunks.ceiling must be at least 1",
                path.display()
            )));
        }

        Ok(config)
    }
}
