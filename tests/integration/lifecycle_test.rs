//! Command lifecycle integration tests.
//!
//! Read-only mode, confirmation, error handling, the mutating commands and FILTER.

use super::{sample_store, shell_with, Recording};
use colshell::commands::handlers::mutate::Delete;
use colshell::commands::{CommandRouter, CONFIRM_BRACKET, SEPARATOR};
use colshell::error::ShellError;
use colshell::traversal::Level;
use pretty_assertions::assert_eq;

#[test]
fn test_readonly_blocks_every_mutating_command() {
    let mut shell = shell_with(sample_store(), true);
    shell.execute_line("readonly on").unwrap();
    shell.store().reset_call_count();

    for line in [
        "put t1 row9 fam1 q1 v9",
        "delete! t1 row1",
        "create t3 fam",
        "rename t1 row1 fam1 q1 q9",
    ] {
        let err = shell.execute_line(line).unwrap_err();
        assert!(
            matches!(err, ShellError::ReadonlyViolation(_)),
            "{line}: {err}"
        );
        assert_eq!(shell.store().call_count(), 0, "{line}");
    }

    assert!(shell.execute_line("scan t1").is_ok());
}

#[test]
fn test_readonly_message_names_command() {
    let mut shell = shell_with(sample_store(), true);
    shell.session_mut().readonly = true;

    let err = shell.execute_line("p t1 r f q v").unwrap_err();

    assert_eq!(
        err.to_string(),
        "Non-readonly command PUT not allowed in readonly mode\nEnter 'help readonly' for more information"
    );
}

#[test]
fn test_readonly_can_be_lifted() {
    let mut shell = shell_with(sample_store(), true);
    shell.execute_line("ro").unwrap();
    assert!(shell.session().readonly);
    shell.execute_line("ro").unwrap();

    shell.execute_line("put t1 row9 fam1 q1 v9").unwrap();
    assert_eq!(
        shell.store().peek("t1", "row9", "fam1", "q1"),
        Some("v9".to_string())
    );
}

#[test]
fn test_declined_delete_previews_without_deleting() {
    let mut shell = shell_with(sample_store(), false);
    let invocation = CommandRouter::parse("delete t1 row2").unwrap().unwrap();
    let mut command = Recording::new(Delete::default());

    shell.run_command(&mut command, &invocation).unwrap();

    assert!(command.found.is_empty());
    assert!(shell.store().peek("t1", "row2", "fam1", "q1").is_some());

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(
        &lines[start..],
        ["t1", "  row2", CONFIRM_BRACKET, "Sure to DELETE?", CONFIRM_BRACKET]
    );
}

#[test]
fn test_confirmed_delete_of_cells() {
    let mut shell = shell_with(sample_store(), true);
    let invocation = CommandRouter::parse("delete t1 row1 fam1 q1").unwrap().unwrap();
    let mut command = Recording::new(Delete::default());

    shell.run_command(&mut command, &invocation).unwrap();

    assert_eq!(command.found.len(), 1);
    assert_eq!(command.found[0].0, Level::Qualifier);
    assert!(shell.store().peek("t1", "row1", "fam1", "q1").is_none());
    assert!(shell.store().peek("t1", "row1", "fam1", "q2").is_some());
    assert!(shell.store().peek("t1", "row1", "fam2", "q1").is_some());
    assert!(shell.output().lines().contains(&"1 deleted".to_string()));
}

#[test]
fn test_preview_failure_is_swallowed() {
    let mut shell = shell_with(sample_store(), false);
    shell.store().fail_on("list_rows");

    shell.execute_line("delete t1 row1").unwrap();

    let lines = shell.output().lines();
    assert!(lines.iter().any(|l| l.starts_with("ERROR: Store error")));
    assert!(lines.contains(&"Sure to DELETE?".to_string()));
}

#[test]
fn test_store_failure_during_execution_is_swallowed() {
    let mut shell = shell_with(sample_store(), true);
    shell.store().fail_on("delete_row");

    shell.execute_line("delete t1 row1").unwrap();

    let lines = shell.output().lines();
    assert!(lines
        .iter()
        .any(|l| l == "ERROR: Store error: delete_row failed: injected failure"));
    assert_eq!(lines.last().map(String::as_str), Some(SEPARATOR));
    assert!(shell.store().peek("t1", "row1", "fam1", "q1").is_some());
}

#[test]
fn test_invalid_pattern_reported_before_store_access() {
    let mut shell = shell_with(sample_store(), true);
    shell.store().reset_call_count();

    let err = shell.execute_line("scan t1 [").unwrap_err();

    assert_eq!(err.category(), "Argument Error");
    assert!(err.to_string().contains("ROW"));
    assert_eq!(shell.store().call_count(), 0);
}

#[test]
fn test_create_then_put_then_get() {
    let mut shell = shell_with(sample_store(), true);

    shell.execute_line("create t3 info").unwrap();
    shell.execute_line("put t3 alice info city paris").unwrap();
    shell.execute_line("get t3 alice").unwrap();

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(&lines[start..], ["t3", "  alice", SEPARATOR]);
}

#[test]
fn test_create_existing_table_is_reported() {
    let mut shell = shell_with(sample_store(), true);

    shell.execute_line("create t1 fam1").unwrap();

    assert!(shell
        .output()
        .lines()
        .iter()
        .any(|l| l.contains("already exists")));
}

#[test]
fn test_history_command_lists_entries() {
    let mut shell = shell_with(sample_store(), true);
    shell.execute_line("ls").unwrap();
    shell.execute_line("scan t2").unwrap();
    shell.execute_line("his scan").unwrap();

    let lines = shell.output().lines();
    assert!(lines.contains(&"param-Other     : scan".to_string()));
    assert!(lines.contains(&"   2  scan t2".to_string()));
    assert!(lines.contains(&"   3  his scan".to_string()));
    assert!(!lines.iter().any(|l| l.ends_with("  ls")));
}

#[test]
fn test_filter_prints_rows_with_a_matching_cell() {
    let mut shell = shell_with(sample_store(), true);

    shell.execute_line("filter t1 . fam2 note").unwrap();

    let lines = shell.output().lines();
    let start = lines.iter().position(|l| l == SEPARATOR).unwrap() + 1;
    assert_eq!(
        &lines[start..],
        ["t1/row3", "  fam2:note = hello", "1 row(s) matched", SEPARATOR]
    );
}

#[test]
fn test_confirmed_rename_moves_matching_cells() {
    let mut shell = shell_with(sample_store(), true);

    shell.execute_line("rename t1 row1 fam1 ^q2$ q9").unwrap();

    assert!(shell.store().peek("t1", "row1", "fam1", "q2").is_none());
    assert_eq!(
        shell.store().peek("t1", "row1", "fam1", "q9"),
        Some("v1".to_string())
    );
    assert!(shell.store().peek("t1", "row1", "fam1", "q1").is_some());
    assert!(shell.output().lines().contains(&"1 renamed".to_string()));
}

#[test]
fn test_declined_rename_keeps_cells() {
    let mut shell = shell_with(sample_store(), false);

    shell.execute_line("ren t1 row1 fam1 ^q2$ q9").unwrap();

    assert!(shell.store().peek("t1", "row1", "fam1", "q2").is_some());
    assert!(shell.store().peek("t1", "row1", "fam1", "q9").is_none());
    assert!(shell
        .output()
        .lines()
        .contains(&"Sure to RENAME?".to_string()));
}

#[test]
fn test_reg_delete_alias_deletes_by_pattern() {
    let mut shell = shell_with(sample_store(), true);

    shell.execute_line("rd! t1 ^row[12]$").unwrap();

    assert!(shell.store().peek("t1", "row1", "fam1", "q1").is_none());
    assert!(shell.store().peek("t1", "row2", "fam1", "q1").is_none());
    assert!(shell.store().peek("t1", "row3", "fam2", "note").is_some());
}
