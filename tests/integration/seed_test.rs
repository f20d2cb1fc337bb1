//! Seed and configuration file integration tests.

use colshell::commands::{OutputLog, SEPARATOR};
use colshell::config::Config;
use colshell::shell::{AutoConfirm, Shell};
use colshell::store::MemoryStore;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const SEED: &str = r#"
[tables.user]
families = ["info", "blob"]

[tables.user.rows.alice.info]
city = "paris"
name = "Alice"

[tables.user.rows.bob.info]
city = "oslo"

[[tables.user.chunks]]
row = "alice"
family = "blob"
count = 40
"#;

#[test]
fn test_config_and_seed_drive_a_session() {
    let dir = TempDir::new().unwrap();
    let seed_path = dir.path().join("seed.toml");
    fs::write(&seed_path, SEED).unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[shell]\nprompt = \"> \"\n\n[chunks]\nfamilies = [\"blob\"]\n\n[store]\nseed = {:?}\n",
            seed_path.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    assert_eq!(config.chunks.families, vec!["blob"]);
    assert_eq!(config.store.seed.as_deref(), Some(seed_path.as_path()));

    let store = MemoryStore::load_seed(&seed_path).unwrap();
    let mut shell = Shell::new(store, &config)
        .with_output(OutputLog::buffered())
        .with_confirm(Box::new(AutoConfirm(true)));

    shell.execute_line("scan user ^alice$ blob").unwrap();

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(
        &lines[start..],
        [
            "user",
            "  alice",
            "    blob",
            "      f0",
            "        alice:0",
            "      ... omitted 38 entries",
            "      f39",
            "        alice:39",
            SEPARATOR,
        ]
    );
}

#[test]
fn test_seeded_count() {
    let store = MemoryStore::from_seed_str(SEED).unwrap();
    let mut shell = Shell::new(store, &Config::default()).with_output(OutputLog::buffered());

    shell.execute_line("count user . info city").unwrap();

    assert!(shell.output().lines().contains(&"2 row(s)".to_string()));
}

#[test]
fn test_missing_seed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = MemoryStore::load_seed(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.category(), "Configuration Error");
}
