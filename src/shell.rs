//! The interactive shell and the command lifecycle.
//!
//! [`Shell`] owns everything that outlives a single command: the store, the
//! output log, the session (read-only flag, history) and the row guard. Each
//! command line runs through [`Shell::run_command`], which drives the same
//! ordered lifecycle for every command variant.

use crate::commands::handlers::{Command, ExecEnv, Session};
use crate::commands::output::{OutputLog, CONFIRM_BRACKET, SEPARATOR};
use crate::commands::router::{CommandRouter, Invocation};
use crate::config::{ChunkConfig, Config};
use crate::error::{Result, ShellError};
use crate::store::StoreClient;
use crate::traversal::{Flow, RowLimitGuard, Traversal, TraversalPlan};
use std::io;
use tracing::{debug, error, info};

/// Answers confirmation questions.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Reads the answer from stdin; `y` or `yes` confirms.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Gives the same answer to every question.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// The shell: session state plus the command lifecycle.
pub struct Shell<S> {
    store: S,
    out: OutputLog,
    session: Session,
    rows: RowLimitGuard,
    chunks: ChunkConfig,
    confirmer: Box<dyn Confirm>,
    prompt: String,
}

impl<S: StoreClient> Shell<S> {
    /// Creates a shell printing to stdout and confirming on stdin.
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            out: OutputLog::stdout(),
            session: Session {
                readonly: config.shell.readonly,
                ..Default::default()
            },
            rows: RowLimitGuard::default(),
            chunks: config.chunks.clone(),
            confirmer: Box::new(StdinConfirm),
            prompt: config.shell.prompt.clone(),
        }
    }

    /// Replaces the output log.
    pub fn with_output(mut self, out: OutputLog) -> Self {
        self.out = out;
        self
    }

    /// Replaces the confirmation source.
    pub fn with_confirm(mut self, confirmer: Box<dyn Confirm>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Output of the last command.
    pub fn output(&self) -> &OutputLog {
        &self.out
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Parses and runs one command line. Blank lines are ignored.
    pub fn execute_line(&mut self, line: &str) -> Result<()> {
        let Some(invocation) = CommandRouter::parse(line)? else {
            return Ok(());
        };
        self.session.history.push(line.trim().to_string());

        let mut command = invocation.command_type.instantiate();
        self.run_command(command.as_mut(), &invocation)
    }

    /// Runs one command through the lifecycle.
    ///
    /// Errors before execution (read-only violation, bad arguments) are
    /// returned. Errors during execution are logged, printed and swallowed,
    /// and the closing separator is still printed; a row-limit stop is a
    /// normal end.
    pub fn run_command(&mut self, command: &mut dyn Command, invocation: &Invocation) -> Result<()> {
        let command_type = command.command_type();
        self.out.start_new();

        if self.session.readonly && !command.is_read_only() {
            return Err(ShellError::ReadonlyViolation(command_type.to_string()));
        }

        let plan = self.parse_args(command, invocation)?;

        if !invocation.forced && command.needs_confirm() && !self.confirm(command, &plan, invocation)? {
            info!(command = %command_type, "Command cancelled");
            return Ok(());
        }

        self.rows.reset(invocation.row_limit);
        self.out.set_quiet(invocation.quiet);
        let result = self.execute(command, &plan, invocation);
        self.out.set_quiet(false);

        match result {
            Ok(Flow::StopAtLimit) => {
                debug!(command = %command_type, limit = self.rows.limit(), "Stopped at row limit");
            }
            Ok(Flow::Continue) => {}
            Err(e) => {
                error!(command = %command_type, category = e.category(), "{e}");
                self.out.error(e.to_string());
            }
        }

        self.out.info(SEPARATOR);
        Ok(())
    }

    /// Reads command lines until end of input or QUIT. Errors are printed and
    /// the loop continues.
    pub fn run_interactive<F>(&mut self, mut read_line: F) -> Result<()>
    where
        F: FnMut(&mut String) -> io::Result<usize>,
    {
        let mut line = String::new();
        loop {
            self.out.prompt(&self.prompt);
            line.clear();
            if read_line(&mut line)? == 0 {
                break;
            }
            self.handle_line(&line);
            if self.session.quit_requested {
                break;
            }
        }
        info!("Leaving shell");
        Ok(())
    }

    /// Runs each line in turn, stopping early at QUIT.
    pub fn run_batch(&mut self, lines: &[String]) {
        for line in lines {
            self.handle_line(line);
            if self.session.quit_requested {
                break;
            }
        }
    }

    fn handle_line(&mut self, line: &str) {
        if let Err(e) = self.execute_line(line) {
            debug!(category = e.category(), "{e}");
            self.out.error(e.to_string());
        }
    }

    fn parse_args(&mut self, command: &mut dyn Command, invocation: &Invocation) -> Result<TraversalPlan> {
        let args = &invocation.args;
        if !command.check_arg_count(args.len()) {
            return Err(ShellError::argument(format!(
                "Invalid argument number '{}'\nUsage: {}",
                args.len(),
                command.usage()
            )));
        }
        command.bind_args(args)?;

        let plan = TraversalPlan {
            filters: command.assign_params(args)?,
            level: command.level(args),
            to_output: command.to_output(),
            notify: command.notify_enabled(),
            exact_row: command.exact_row(args),
        };

        self.out
            .info(format!("taskType        : {}", command.command_type()));
        if let Some(level) = plan.level {
            self.out.info(format!("level           : {level}"));
        }
        for line in plan.filters.summary_lines() {
            self.out.info(line);
        }
        self.out.info(SEPARATOR);
        Ok(plan)
    }

    /// Previews what the command would touch and asks for confirmation.
    fn confirm(
        &mut self,
        command: &mut dyn Command,
        plan: &TraversalPlan,
        invocation: &Invocation,
    ) -> Result<bool> {
        if command.traverses() {
            let preview = TraversalPlan {
                notify: false,
                ..plan.clone()
            };
            self.rows.reset(invocation.row_limit);
            if let Err(e) = self.traverse(command, &preview) {
                error!(command = %command.command_type(), "Preview failed: {e}");
                self.out.error(e.to_string());
            }
        }

        self.out.info(CONFIRM_BRACKET);
        let question = format!("Sure to {}?", command.command_type());
        self.out.ask(&question);
        let confirmed = self.confirmer.confirm(&question)?;
        self.out.info(CONFIRM_BRACKET);
        Ok(confirmed)
    }

    fn execute(
        &mut self,
        command: &mut dyn Command,
        plan: &TraversalPlan,
        invocation: &Invocation,
    ) -> Result<Flow> {
        if !command.traverses() {
            let mut env = ExecEnv {
                store: &self.store,
                out: &mut self.out,
                session: &mut self.session,
                args: &invocation.args,
                filters: &plan.filters,
            };
            command.execute(&mut env)?;
            return Ok(Flow::Continue);
        }

        let flow = self.traverse(command, plan)?;
        command.finish(&mut self.out);
        Ok(flow)
    }

    fn traverse(&mut self, command: &mut dyn Command, plan: &TraversalPlan) -> Result<Flow> {
        Traversal::new(
            &self.store,
            &mut self.out,
            &mut self.rows,
            command,
            plan,
            &self.chunks,
        )
        .run()
    }
}
