// ABOUTME: Application-wide error types for rollguard.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::exec::ExecError;
use crate::types::ParseImageRefError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown environment '{name}' (valid: {})", .valid.join(", "))]
    UnknownEnvironment { name: String, valid: Vec<String> },

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid image: {0}")]
    InvalidImage(#[from] ParseImageRefError),

    #[error(transparent)]
    Execution(#[from] ExecError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Caller mistakes that no retry will fix.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownEnvironment { .. }
                | Error::ConfigNotFound(_)
                | Error::InvalidConfig(_)
                | Error::InvalidImage(_)
                | Error::Yaml(_)
        )
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, Error>;
