//! CLI module for execp
//!
//! Provides command-line interface with the following subcommands:
//! - `run` - Run a program and print its captured output
//! - `config` - Show resolved configuration

pub mod commands;

pub use commands::{Cli, Commands};
