// ABOUTME: Entry point for the rollguard CLI application.
// ABOUTME: Parses arguments, loads config, and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use rollguard::config::Config;
use rollguard::error::Result;
use rollguard::exec::{ExecMode, ProcessRunner};
use rollguard::orchestrator::{DeployOptions, Orchestrator, RollbackOptions};
use rollguard::output::{Output, OutputMode};
use rollguard::types::RevisionRef;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mode = OutputMode::from_flags(cli.quiet, cli.json);

    if let Err(e) = run(cli, mode).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::discover_or_default(&env::current_dir()?),
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let config = load_config(&cli)?;
    let runner = ProcessRunner;
    let orchestrator = Orchestrator::new(&config, &runner);
    let output = Output::new(mode);

    match cli.command {
        Commands::Deploy {
            environment,
            image_tag,
            dry_run,
            health_timeout,
        } => {
            let options = DeployOptions {
                mode: ExecMode::from_dry_run(dry_run),
                health_timeout,
            };
            commands::deploy(&orchestrator, &environment, &image_tag, options, output).await
        }
        Commands::Rollback {
            environment,
            revision,
            health_timeout,
        } => {
            let options = RollbackOptions {
                revision: RevisionRef::from(revision),
                health_timeout,
            };
            commands::rollback(&orchestrator, &environment, options, output).await
        }
        Commands::Status { environment } => {
            commands::status(&orchestrator, &environment, output).await
        }
    }
}
