use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    DomainError,
    Outcome,
};

/// Captured output of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    exit_code: i32,
    standard_output: String,
    standard_error: String,
}

impl CommandOutput {
    pub fn create(
        exit_code: i32,
        standard_output: impl Into<String>,
        standard_error: impl Into<String>,
    ) -> Self {
        Self {
            exit_code,
            standard_output: standard_output.into(),
            standard_error: standard_error.into(),
        }
    }

    /// Output of a command which could not be invoked at all.
    pub fn failed(error_message: impl Into<String>) -> Outcome<Self> {
        let error_message = error_message.into();
        if error_message.is_empty() {
            return Err(DomainError::validation(
                "Error message cannot be null or empty",
            ));
        }

        Ok(Self {
            exit_code: -1,
            standard_output: String::new(),
            standard_error: error_message,
        })
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn standard_output(&self) -> &str {
        &self.standard_output
    }

    pub fn standard_error(&self) -> &str {
        &self.standard_error
    }

    pub fn is_successful(&self) -> bool {
        self.exit_code == 0
    }

    pub fn has_output(&self) -> bool {
        !self.standard_output.is_empty()
    }
}

/// Runs external commands such as `docker` or `brew`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Whether the command can be found on the host.
    fn is_command_available(&self, command: &str) -> bool;

    async fn run(
        &self,
        command: &str,
        arguments: &[&str],
        cancel: &CancellationToken,
    ) -> Outcome<CommandOutput>;
}
