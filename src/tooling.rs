//! Tooling & Integration Layer
//!
//! Terminal front end for the record table: the command-line interface, the
//! interactive shell, and table rendering.

pub mod cli;
pub mod format;
pub mod shell;

pub use cli::{Cli, CliContext, Commands};
