//! Integration tests for colshell.
//!
//! Drive the shell through the library API against the in-memory store.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
