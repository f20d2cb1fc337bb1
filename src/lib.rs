//! colshell - an interactive shell over a wide-column store.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
pub mod store;
pub mod traversal;
