//! Command handlers.
//!
//! Each submodule implements one CLI command: translate parsed arguments
//! into core calls, wire up adapters, and present results.

pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod list;
