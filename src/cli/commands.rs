//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::executor::{DecodePolicy, Invocation};

/// Run a program and capture its output.
///
/// Prints the program's stdout on success. When the program exits non-zero
/// and wrote to stderr, prints that text and exits with failure.
#[derive(Parser, Debug)]
#[command(name = "execp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a program with arguments
    Run(RunArgs),

    /// Show resolved configuration
    Config(ConfigArgs),
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// How to decode output that is not valid UTF-8 (defaults to config)
    #[arg(short, long, value_enum)]
    pub decode: Option<DecodePolicy>,

    /// Program followed by its arguments, passed verbatim
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PROGRAM"
    )]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Build the invocation from the positional command words
    pub fn invocation(&self) -> Invocation {
        let mut words = self.command.iter();
        let program = words.next().cloned().unwrap_or_default();
        Invocation::new(program).args(words.cloned())
    }
}

/// Output format for `run`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Raw program output
    Text,
    /// JSON object with the outcome
    Json,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Output format for `config`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}
