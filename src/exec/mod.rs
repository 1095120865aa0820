// ABOUTME: Command execution boundary between the orchestrator and the control plane.
// ABOUTME: Exports the command type, runner strategies, and the audited executor.

mod command;
mod error;
mod executor;
mod runner;

pub use command::Command;
pub use error::{ExecError, ExecErrorKind};
pub use executor::{ExecMode, Executor};
pub use runner::{CommandOutput, CommandRunner, DryRunRunner, ProcessRunner};
