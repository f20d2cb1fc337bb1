//! Command output log.
//!
//! Every line a command prints goes through [`OutputLog`]. Each command starts
//! a fresh segment, so the lines produced by the last command can be inspected
//! (tests and the `-e` batch mode rely on this). Quiet mode suppresses
//! informational lines; errors are always printed.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use tracing::warn;

/// Line closing the parameter echo and the command output.
pub const SEPARATOR: &str = "---------------------------------------";

/// Line bracketing confirmation prompts.
pub const CONFIRM_BRACKET: &str = "******************************";

/// Destination of command output, with a record of the current segment.
pub struct OutputLog {
    sink: Box<dyn Write>,
    quiet: bool,
    segment: Vec<String>,
}

impl OutputLog {
    /// Creates a log writing to the given sink.
    pub fn new(sink: Box<dyn Write>) -> Self {
        Self {
            sink,
            quiet: false,
            segment: Vec::new(),
        }
    }

    /// Creates a log writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a log that only records lines.
    pub fn buffered() -> Self {
        Self::new(Box::new(io::sink()))
    }

    /// Begins a new output segment.
    pub fn start_new(&mut self) {
        self.segment.clear();
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    /// Prints an informational line unless quiet.
    pub fn info(&mut self, line: impl Into<String>) {
        if self.quiet {
            return;
        }
        self.emit(line.into());
    }

    /// Prints an error line, regardless of quiet mode.
    pub fn error(&mut self, line: impl Into<String>) {
        self.emit(format!("ERROR: {}", line.into()));
    }

    /// Prints a prompt without a trailing newline. Not recorded in the segment.
    pub fn prompt(&mut self, text: &str) {
        if let Err(e) = write!(self.sink, "{text}").and_then(|_| self.sink.flush()) {
            warn!("Failed to write prompt: {e}");
        }
    }

    /// Prints a question awaiting an answer on the same line. Recorded, unlike
    /// [`prompt`](Self::prompt), and printed even when quiet.
    pub fn ask(&mut self, question: &str) {
        self.prompt(&format!("{question} "));
        self.segment.push(question.to_string());
    }

    /// Clears the terminal and moves the cursor home. Not recorded.
    pub fn clear_screen(&mut self) {
        if let Err(e) = execute!(self.sink, Clear(ClearType::All), MoveTo(0, 0)) {
            warn!("Failed to clear screen: {e}");
        }
    }

    /// Lines recorded since the last [`start_new`](Self::start_new).
    pub fn lines(&self) -> &[String] {
        &self.segment
    }

    fn emit(&mut self, line: String) {
        if let Err(e) = writeln!(self.sink, "{line}") {
            warn!("Failed to write output: {e}");
        }
        self.segment.push(line);
    }
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::stdout()
    }
}
