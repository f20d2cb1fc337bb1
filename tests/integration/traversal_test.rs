//! Traversal integration tests.
//!
//! Run real commands through the shell lifecycle and inspect output and
//! notifications.

use super::{sample_store, shell_with, Recording};
use colshell::commands::handlers::browse::{Count, Get};
use colshell::commands::{CommandRouter, SEPARATOR};
use colshell::config::{ChunkConfig, Config};
use colshell::commands::OutputLog;
use colshell::shell::{AutoConfirm, Shell};
use colshell::store::MemoryStore;
use colshell::traversal::Level;
use pretty_assertions::assert_eq;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_get_full_path_notifies_once() {
    let mut shell = shell_with(sample_store(), true);
    let invocation = CommandRouter::parse("get t1 row1 fam1 q1 v1")
        .unwrap()
        .unwrap();
    let mut command = Recording::new(Get);

    shell.run_command(&mut command, &invocation).unwrap();

    assert_eq!(
        command.found,
        vec![(Level::Value, strings(&["t1", "row1", "fam1", "q1", "v1"]))]
    );

    let lines = shell.output().lines();
    let tree: Vec<&str> = lines
        .iter()
        .skip_while(|l| l.as_str() != SEPARATOR)
        .skip(1)
        .map(String::as_str)
        .collect();
    assert_eq!(
        tree,
        vec!["t1", "  row1", "    fam1", "      q1", "        v1", SEPARATOR]
    );
}

#[test]
fn test_get_row_level_notifies_row() {
    let mut shell = shell_with(sample_store(), true);
    let invocation = CommandRouter::parse("get t1 row1").unwrap().unwrap();
    let mut command = Recording::new(Get);

    shell.run_command(&mut command, &invocation).unwrap();

    assert_eq!(command.found, vec![(Level::Row, strings(&["t1", "row1"]))]);
}

#[test]
fn test_quiet_mode_keeps_notifications() {
    let invocation = CommandRouter::parse("count t1").unwrap().unwrap();
    let quiet = CommandRouter::parse("count- t1").unwrap().unwrap();

    let mut shell = shell_with(sample_store(), true);
    let mut loud_cmd = Recording::new(Count::default());
    shell.run_command(&mut loud_cmd, &invocation).unwrap();
    assert!(shell.output().lines().contains(&"3 row(s)".to_string()));

    let mut shell = shell_with(sample_store(), true);
    let mut quiet_cmd = Recording::new(Count::default());
    shell.run_command(&mut quiet_cmd, &quiet).unwrap();

    assert_eq!(loud_cmd.found, quiet_cmd.found);
    assert_eq!(quiet_cmd.found.len(), 3);
    assert!(!shell.output().lines().iter().any(|l| l.contains("row(s)")));
}

#[test]
fn test_row_limit_stops_notifications() {
    let mut shell = shell_with(sample_store(), true);
    let invocation = CommandRouter::parse("count2 t1").unwrap().unwrap();
    let mut command = Recording::new(Count::default());

    shell.run_command(&mut command, &invocation).unwrap();

    assert_eq!(command.found.len(), 2);
    assert!(shell.output().lines().contains(&"2 row(s)".to_string()));
}

#[test]
fn test_zero_row_limit_touches_no_row() {
    let mut shell = shell_with(sample_store(), true);
    let invocation = CommandRouter::parse("count0").unwrap().unwrap();
    let mut command = Recording::new(Count::default());

    shell.run_command(&mut command, &invocation).unwrap();

    assert!(command.found.is_empty());
    assert!(shell.output().lines().contains(&"0 row(s)".to_string()));
}

#[test]
fn test_list_families_of_row() {
    let mut shell = shell_with(sample_store(), true);
    shell.execute_line("ls t1 row1 .").unwrap();

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(
        &lines[start..],
        ["t1", "  row1", "    fam1", "    fam2", SEPARATOR]
    );
}

#[test]
fn test_describe_prints_declared_families() {
    let mut shell = shell_with(sample_store(), true);
    shell.execute_line("desc ^t1$").unwrap();

    let lines = shell.output().lines();
    assert!(lines.contains(&"t1".to_string()));
    assert!(lines.contains(&"  families: fam1, fam2".to_string()));
    assert_eq!(shell.store().open_handles(), 0);
}

#[test]
fn test_scan_value_filter() {
    let mut shell = shell_with(sample_store(), true);
    shell.execute_line("scan \"\" \"\" \"\" \"\" ^dave$").unwrap();

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(
        &lines[start..],
        ["t2", "  k1", "    meta", "      owner", "        dave", SEPARATOR]
    );
}

#[test]
fn test_chunked_family_shows_first_and_last() {
    let store = MemoryStore::new();
    store.insert_table("docs", &["file".to_string()]);
    for i in 0..500u64 {
        store.insert("docs", "d1", "file", &format!("f{i}"), &format!("c{i}"));
    }
    let config = Config {
        chunks: ChunkConfig {
            families: vec!["file".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let mut shell = Shell::new(store, &config)
        .with_output(OutputLog::buffered())
        .with_confirm(Box::new(AutoConfirm(true)));
    shell.store().reset_call_count();

    shell.execute_line("scan docs").unwrap();

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(
        &lines[start..],
        [
            "docs",
            "  d1",
            "    file",
            "      f0",
            "        c0",
            "      ... omitted 498 entries",
            "      f499",
            "        c499",
            SEPARATOR,
        ]
    );
    assert!(shell.store().call_count() < 40);
}
