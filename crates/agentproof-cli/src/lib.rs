//! agentproof CLI library.
//!
//! Configuration, command execution and output formatting for the `agentproof`
//! command-line tool: verify, validate and read outcomes from proof packages, fetch
//! them from agents, and dry-run market resolution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
