//! execp CLI entry point
//!
//! Usage:
//!   execp run <program> [args]...   Run a program and print its stdout
//!   execp config                    Show resolved configuration

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use execp::cli::{
    commands::{ConfigArgs, ConfigFormat, OutputFormat, RunArgs},
    Cli, Commands,
};
use execp::config::{load_config, Config, Loaded};
use execp::logging::init_logging;
use execp::{run_command, ErrorInfo};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let loaded = load_config(cli.config.as_deref())?;
    init_logging(&loaded.config.logging, cli.verbose)?;

    for path in &loaded.files {
        tracing::debug!("Loaded config from: {}", path.display());
    }
    if let Some(path) = &loaded.missing_override {
        tracing::warn!("Override config not found: {}", path.display());
    }

    match cli.command {
        Commands::Run(args) => run_program(args, &loaded.config, cli.verbose).await,
        Commands::Config(args) => {
            show_config(args, &loaded)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run a program and report its outcome
async fn run_program(args: RunArgs, config: &Config, verbose: bool) -> Result<ExitCode> {
    let invocation = args.invocation();

    let mut options = config.exec_options();
    if let Some(decode) = args.decode {
        options = options.with_decode(decode);
    }

    if verbose {
        eprintln!("{}: {}", "command".cyan(), invocation);
    }

    let outcome = run_command(&invocation, &options).await;

    match args.format {
        OutputFormat::Text => match outcome {
            Ok(stdout) => {
                let mut out = std::io::stdout().lock();
                out.write_all(stdout.as_bytes())
                    .and_then(|_| out.flush())
                    .context("Failed to write output")?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let description = e.to_string();
                eprint!("{}", description);
                if !description.ends_with('\n') {
                    eprintln!();
                }
                if verbose {
                    eprintln!(
                        "{}: {} (exit code {:?})",
                        "failed".red(),
                        e.command(),
                        e.exit_code()
                    );
                }
                Ok(ExitCode::FAILURE)
            }
        },
        OutputFormat::Json => {
            let (json, code) = match &outcome {
                Ok(stdout) => (
                    serde_json::json!({ "ok": true, "stdout": stdout }),
                    ExitCode::SUCCESS,
                ),
                Err(e) => (
                    serde_json::json!({ "ok": false, "error": ErrorInfo::from(e) }),
                    ExitCode::FAILURE,
                ),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(code)
        }
    }
}

/// Show the resolved configuration
fn show_config(args: ConfigArgs, loaded: &Loaded) -> Result<()> {
    match args.format {
        ConfigFormat::Toml => {
            for path in &loaded.files {
                println!("# loaded: {}", path.display());
            }
            let toml = toml::to_string_pretty(&loaded.config)
                .context("Failed to render configuration")?;
            print!("{}", toml);
        }
        ConfigFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&loaded.config)?);
        }
    }

    Ok(())
}
