//! Help text for shell commands, built from the command registry.

use super::definitions::CommandType;
use super::handlers::Command;

/// Trailing modifiers accepted on any command token.
pub const MODIFIERS_TEXT: &str = r#"Command modifiers (append to the command name, in this order):
  N    - stop after N rows, e.g. scan10
  -    - quiet: suppress normal output, e.g. count-
  !    - force: skip confirmation, e.g. delete!

Arguments are regular expressions matched anywhere in the name or value.
Quote an argument to include spaces, or use "" to match everything."#;

/// One line per command: name, aliases and description.
pub fn overview() -> Vec<String> {
    let mut lines = vec!["Available commands:".to_string()];
    for command_type in CommandType::ALL {
        let command = command_type.instantiate();
        lines.push(format!(
            "  {:<10} {:<10} - {}",
            command_type.name(),
            alias_list(command.as_ref()),
            command.description()
        ));
    }
    lines.push(String::new());
    lines.extend(MODIFIERS_TEXT.lines().map(str::to_string));
    lines.push(String::new());
    lines.push("Enter 'help <command>' for details.".to_string());
    lines
}

/// Detailed help for one command.
pub fn command_help(command: &dyn Command) -> Vec<String> {
    let mut lines = vec![
        format!("{} - {}", command.command_type(), command.description()),
        format!("  usage    : {}", command.usage()),
        format!("  example  : {}", command.example()),
        format!("  aliases  : {}", alias_list(command)),
    ];
    if !command.is_read_only() {
        lines.push("  Modifies data; rejected in readonly mode.".to_string());
    }
    if command.needs_confirm() {
        lines.push("  Asks for confirmation unless forced with '!'.".to_string());
    }
    if command.command_type() == CommandType::Readonly {
        lines.push(
            "  In readonly mode, commands that modify data (put, delete, create, rename) are rejected."
                .to_string(),
        );
    }
    lines
}

fn alias_list(command: &dyn Command) -> String {
    command.aliases().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_lists_every_command() {
        let lines = overview();
        for command_type in CommandType::ALL {
            assert!(
                lines
                    .iter()
                    .any(|l| l.trim_start().starts_with(command_type.name())),
                "{command_type} missing from help"
            );
        }
    }

    #[test]
    fn test_command_help_for_delete() {
        let lines = command_help(CommandType::Delete.instantiate().as_ref());
        assert_eq!(lines[0], "DELETE - Delete matching rows, families or cells");
        assert!(lines.iter().any(|l| l.contains("del, d")));
        assert!(lines.iter().any(|l| l.contains("confirmation")));
    }
}
