// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rollguard::config::MIN_HEALTH_TIMEOUT;

#[derive(Parser)]
#[command(name = "rollguard")]
#[command(about = "Kubernetes deploys with health verification and automatic rollback")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (default: discover in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON lines output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Roll a new image tag out to an environment
    Deploy {
        /// Target environment (defined in config)
        #[arg(short, long)]
        environment: String,

        /// Image tag to deploy
        #[arg(short, long)]
        image_tag: String,

        /// Log mutating commands without running them
        #[arg(long)]
        dry_run: bool,

        /// Override the configured health check budget (e.g. 90s, 5m)
        #[arg(long, value_parser = parse_health_timeout)]
        health_timeout: Option<Duration>,
    },

    /// Roll back to the previous (or a specific) revision
    Rollback {
        /// Target environment (defined in config)
        #[arg(short, long)]
        environment: String,

        /// Revision to restore (default: previous)
        #[arg(short, long)]
        revision: Option<u32>,

        /// Override the configured health check budget (e.g. 90s, 2m)
        #[arg(long, value_parser = parse_health_timeout)]
        health_timeout: Option<Duration>,
    },

    /// Show the running image, revision history, and pods
    Status {
        /// Target environment (defined in config)
        #[arg(short, long)]
        environment: String,
    },
}

/// Humantime duration of at least one second.
fn parse_health_timeout(raw: &str) -> Result<Duration, String> {
    let timeout = humantime::parse_duration(raw).map_err(|e| e.to_string())?;
    if timeout < MIN_HEALTH_TIMEOUT {
        return Err(format!("must be at least 1s, got {raw}"));
    }
    Ok(timeout)
}
