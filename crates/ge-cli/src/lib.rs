//! git-estimate CLI library.
//!
//! This crate wires the commit history reader, the estimation engine and the
//! report formatters behind the `git-estimate` command line.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::Config;
