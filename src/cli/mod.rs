//! Command-line interface for teprosif
//!
//! Argument definitions (clap derive) and the command implementations used
//! by the `teprosif` binary.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ModeArg};
