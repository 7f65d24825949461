use std::{
    env,
    path::Path,
    process::Stdio,
};

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::{
    context::{
        CommandOutput,
        CommandRunner,
    },
    DomainError,
    Outcome,
};

fn is_executable(candidate: &Path) -> bool {
    if candidate.is_file() {
        return true;
    }

    cfg!(windows) && candidate.with_extension("exe").is_file()
}

/// [`CommandRunner`] spawning processes on the host.
/// A running command gets killed once the cancellation token fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    fn is_command_available(&self, command: &str) -> bool {
        if command.contains(std::path::MAIN_SEPARATOR) {
            return is_executable(Path::new(command));
        }

        env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).any(|dir| is_executable(&dir.join(command))))
            .unwrap_or(false)
    }

    async fn run(
        &self,
        command: &str,
        arguments: &[&str],
        cancel: &CancellationToken,
    ) -> Outcome<CommandOutput> {
        log::debug!("Running {} {}", command, arguments.join(" "));

        let mut process = Command::new(command);
        process
            .args(arguments)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        let output = process.output();

        tokio::select! {
            output = output => match output {
                Ok(output) => Ok(CommandOutput::create(
                    output.status.code().unwrap_or(-1),
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                )),
                Err(error) => {
                    log::debug!("Failed to invoke {}: {:#}", command, error);
                    CommandOutput::failed(format!("Failed to run {}: {}", command, error))
                }
            },
            _ = cancel.cancelled() => Err(DomainError::invalid_operation(format!(
                "{} has been cancelled",
                command
            ))),
        }
    }
}
