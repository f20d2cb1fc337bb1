//! Command parsing and dispatch.
//!
//! Parsing (tokenizer, router) is kept apart from execution (handlers, driven
//! by the shell lifecycle), so command lines can be unit tested without a store.

pub mod definitions;
pub mod handlers;
pub mod help;
pub mod output;
pub mod router;
pub mod tokenizer;

pub use definitions::{lookup, CommandFactory, CommandType};
pub use handlers::{Command, ExecEnv, Session};
pub use output::{OutputLog, CONFIRM_BRACKET, SEPARATOR};
pub use router::{CommandRouter, CommandToken, Invocation};
pub use tokenizer::tokenize;
