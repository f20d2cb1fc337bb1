//! colsh - an interactive shell over a wide-column store.

mod cli;

use cli::Cli;
use colshell::config::Config;
use colshell::error::Result;
use colshell::logging::{self, LogTarget};
use colshell::shell::{AutoConfirm, Shell};
use colshell::store::MemoryStore;
use std::io;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();

    let target = LogTarget::choose(cli.log_file.as_deref(), !cli.is_batch());
    logging::init(&target);

    if let Err(e) = run(&cli) {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    let store = match &config.store.seed {
        Some(seed) => {
            info!("Seeding store from: {}", seed.display());
            MemoryStore::load_seed(seed)?
        }
        None => MemoryStore::new(),
    };

    let mut shell = Shell::new(store, &config);
    if cli.yes {
        shell = shell.with_confirm(Box::new(AutoConfirm(true)));
    }

    if cli.is_batch() {
        shell.run_batch(&cli.execute);
        return Ok(());
    }

    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Enter 'help' for the list of commands, 'quit' to leave.");
    shell.run_interactive(|buf| io::stdin().read_line(buf))
}
