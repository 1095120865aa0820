// ABOUTME: Strategies for carrying out a command: spawn a process or skip it.
// ABOUTME: The dry-run strategy logs and returns an empty successful result.

use std::process::Stdio;

use async_trait::async_trait;
use snafu::ResultExt;

use super::Command;
use super::error::{ExecError, SpawnSnafu};

/// Captured result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process was killed by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Carries out a [`Command`].
///
/// This is the only boundary through which the orchestrator reaches the
/// outside world.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &Command) -> Result<CommandOutput, ExecError>;
}

/// Runs commands as local child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &Command) -> Result<CommandOutput, ExecError> {
        let output = tokio::process::Command::new(command.program())
            .args(command.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context(SpawnSnafu {
                command: command.to_string(),
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Logs that the command was skipped and reports an empty success.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, _command: &Command) -> Result<CommandOutput, ExecError> {
        tracing::info!("  (dry-run, skipped)");
        Ok(CommandOutput::default())
    }
}
