//! JobScout CLI library.
//!
//! Configuration loading, command execution, digest rendering and local
//! delivery for the `jobscout` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notifier;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use notifier::PreviewNotifier;
pub use output::Formatter;
