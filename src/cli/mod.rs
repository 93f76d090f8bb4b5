// CLI module for mp3info
//
// Command-line front end over the library's synchronous scan API. Only the
// binary compiles this module.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

pub type CliResult<T> = anyhow::Result<T>;
