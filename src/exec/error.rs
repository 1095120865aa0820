// ABOUTME: Executor error types with SNAFU pattern.
// ABOUTME: Separates programs that never started from programs that exited non-zero.

use snafu::Snafu;

/// Failure to run an external command to a successful exit.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ExecError {
    #[snafu(display("failed to start `{command}`: {source}"))]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` exited with status {exit_code}{}", detail(stderr, stdout)))]
    NonZeroExit {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecErrorKind {
    /// The program could not be started.
    Spawn,
    /// The program ran and reported failure.
    NonZeroExit,
}

impl ExecError {
    pub fn kind(&self) -> ExecErrorKind {
        match self {
            ExecError::Spawn { .. } => ExecErrorKind::Spawn,
            ExecError::NonZeroExit { .. } => ExecErrorKind::NonZeroExit,
        }
    }

    /// Exit code reported by the program, if it ran.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::NonZeroExit { exit_code, .. } => Some(*exit_code),
            ExecError::Spawn { .. } => None,
        }
    }

    /// Everything the program printed, stderr first.
    pub fn output(&self) -> String {
        match self {
            ExecError::NonZeroExit { stdout, stderr, .. } => {
                let mut combined = stderr.trim().to_string();
                if !stdout.trim().is_empty() {
                    if !combined.is_empty() {
                        combined.push('\n');
                    }
                    combined.push_str(stdout.trim());
                }
                combined
            }
            ExecError::Spawn { source, .. } => source.to_string(),
        }
    }
}

fn detail(stderr: &str, stdout: &str) -> String {
    let text = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };
    if text.is_empty() {
        String::new()
    } else {
        format!(": {}", text)
    }
}
