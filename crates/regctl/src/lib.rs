//! regctl: operator CLI for the device registry.

pub mod cli;
pub mod commands;
pub mod config;
mod output;

pub use cli::Cli;
pub use commands::execute;
pub use config::CliConfig;
