//! Command-line interface
//!
//! Argument definitions and command handlers for the `schedcfg` binary.

pub mod args;
pub mod commands;
