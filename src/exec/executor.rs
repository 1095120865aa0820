// ABOUTME: Audited command execution on top of a runner strategy.
// ABOUTME: Logs every command line and output, and enforces exit codes.

use super::error::ExecError;
use super::runner::{CommandOutput, CommandRunner, DryRunRunner};
use super::Command;

static DRY_RUN: DryRunRunner = DryRunRunner;

/// Whether mutating commands are carried out or only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    #[default]
    Live,
    DryRun,
}

impl ExecMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            ExecMode::DryRun
        } else {
            ExecMode::Live
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, ExecMode::DryRun)
    }
}

/// Runs commands through a [`CommandRunner`], logging each one first.
#[derive(Clone, Copy)]
pub struct Executor<'a> {
    runner: &'a dyn CommandRunner,
}

impl std::fmt::Debug for Executor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Executor for one operation's mutating commands.
    ///
    /// Dry-run swaps in the logging-only runner; live keeps this executor's.
    pub fn with_mode(&self, mode: ExecMode) -> Executor<'a> {
        match mode {
            ExecMode::Live => *self,
            ExecMode::DryRun => Executor { runner: &DRY_RUN },
        }
    }

    /// Run a command and require a zero exit. Returns trimmed stdout.
    pub async fn run(&self, command: &Command) -> Result<String, ExecError> {
        let output = self.run_unchecked(command).await?;

        if !output.success() {
            return Err(ExecError::NonZeroExit {
                command: command.to_string(),
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(output.stdout.trim().to_string())
    }

    /// Run a command without looking at its exit code.
    pub async fn run_unchecked(&self, command: &Command) -> Result<CommandOutput, ExecError> {
        tracing::info!("$ {}", command);

        let output = self.runner.run(command).await?;

        let stdout = output.stdout.trim();
        if !stdout.is_empty() {
            tracing::info!("{}", stdout);
        }
        if !output.success() {
            let stderr = output.stderr.trim();
            tracing::debug!(exit_code = output.exit_code, "{}", stderr);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecErrorKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a fixed output and counts calls.
    struct Fixed {
        output: CommandOutput,
        calls: Mutex<usize>,
    }

    impl Fixed {
        fn new(exit_code: i32, stdout: &str) -> Self {
            Self {
                output: CommandOutput {
                    exit_code,
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                },
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CommandRunner for Fixed {
        async fn run(&self, _command: &Command) -> Result<CommandOutput, ExecError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.output.clone())
        }
    }

    #[tokio::test]
    async fn run_returns_trimmed_stdout() {
        let runner = Fixed::new(0, "  3\n");
        let executor = Executor::new(&runner);

        let out = executor.run(&Command::new("kubectl")).await.unwrap();
        assert_eq!(out, "3");
    }

    #[tokio::test]
    async fn run_fails_on_non_zero_exit() {
        let runner = Fixed::new(2, "");
        let executor = Executor::new(&runner);

        let err = executor.run(&Command::new("kubectl")).await.unwrap_err();
        assert_eq!(err.kind(), ExecErrorKind::NonZeroExit);
        assert_eq!(err.exit_code(), Some(2));
    }

    #[tokio::test]
    async fn run_unchecked_tolerates_non_zero_exit() {
        let runner = Fixed::new(2, "");
        let executor = Executor::new(&runner);

        let output = executor
            .run_unchecked(&Command::new("kubectl"))
            .await
            .unwrap();
        assert_eq!(output.exit_code, 2);
    }

    #[tokio::test]
    async fn dry_run_mode_never_reaches_runner() {
        let runner = Fixed::new(1, "should not be seen");
        let executor = Executor::new(&runner).with_mode(ExecMode::DryRun);

        let out = executor.run(&Command::new("kubectl")).await.unwrap();
        assert_eq!(out, "");
        assert_eq!(runner.calls(), 0);
    }

    #[tokio::test]
    async fn live_mode_keeps_runner() {
        let runner = Fixed::new(0, "ok");
        let executor = Executor::new(&runner).with_mode(ExecMode::Live);

        executor.run(&Command::new("kubectl")).await.unwrap();
        assert_eq!(runner.calls(), 1);
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(ExecMode::from_dry_run(true), ExecMode::DryRun);
        assert_eq!(ExecMode::from_dry_run(false), ExecMode::Live);
        assert!(ExecMode::DryRun.is_dry_run());
    }
}
