//! Command-line argument parsing for colshell.

use colshell::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// An interactive shell for browsing and editing a wide-column store.
#[derive(Parser, Debug)]
#[command(name = "colsh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "COLSHELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// TOML seed file loaded into the in-memory store (overrides [store].seed)
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Start in read-only mode
    #[arg(long)]
    pub readonly: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Run a command line and exit; may be repeated
    #[arg(short = 'e', long = "execute", value_name = "COMMAND")]
    pub execute: Vec<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies flags that override file configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.readonly {
            config.shell.readonly = true;
        }
        if let Some(seed) = &self.seed {
            config.store.seed = Some(seed.clone());
        }
    }

    /// Returns true if command lines were given on the command line.
    pub fn is_batch(&self) -> bool {
        !self.execute.is_empty()
    }
}
