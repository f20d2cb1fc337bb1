//! Command-line dispatch integration tests.
//!
//! Alias resolution and modifier parsing through the public router.

use colshell::commands::{lookup, CommandRouter, CommandType};
use colshell::error::ShellError;
use colshell::traversal::RowLimitGuard;

#[test]
fn test_every_alias_resolves_case_insensitively() {
    for command_type in CommandType::ALL {
        let command = command_type.instantiate();
        let names = command
            .aliases()
            .iter()
            .copied()
            .chain(std::iter::once(command_type.name()));

        for name in names {
            assert_eq!(lookup(name), Some(command_type), "{name}");
            assert_eq!(lookup(&name.to_uppercase()), Some(command_type), "{name}");
        }
    }
}

#[test]
fn test_modifiers_reach_the_invocation() {
    let invocation = CommandRouter::parse("scan10- t1").unwrap().unwrap();
    assert_eq!(invocation.command_type, CommandType::Scan);
    assert!(invocation.quiet);
    assert!(!invocation.forced);
    assert_eq!(invocation.row_limit, 10);

    let invocation = CommandRouter::parse("scan- t1").unwrap().unwrap();
    assert!(invocation.quiet);
    assert_eq!(invocation.row_limit, RowLimitGuard::UNBOUNDED);

    let invocation = CommandRouter::parse("DELETE3! t1 r").unwrap().unwrap();
    assert_eq!(invocation.command_type, CommandType::Delete);
    assert!(invocation.forced);
    assert_eq!(invocation.row_limit, 3);
}

#[test]
fn test_digits_before_quiet_marker_stay_on_name() {
    let err = CommandRouter::parse("scan-10 t1").unwrap_err();
    assert!(matches!(err, ShellError::CommandNotFound(ref t) if t == "SCAN-"));
}

#[test]
fn test_unknown_command_message() {
    let err = CommandRouter::parse("Frob t1").unwrap_err();
    assert_eq!(err.to_string(), "Undefined command 'FROB'");
    assert_eq!(err.category(), "Command Error");
}

#[test]
fn test_quoted_arguments() {
    let invocation = CommandRouter::parse(r#"put t1 "row 1" fam1 q1 'two words'"#)
        .unwrap()
        .unwrap();
    assert_eq!(
        invocation.args,
        vec!["t1", "row 1", "fam1", "q1", "two words"]
    );
}
