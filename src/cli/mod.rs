//! Command-line interface
//!
//! Argument definitions and command handlers for the `tempocue` binary.

pub mod args;
pub mod commands;
