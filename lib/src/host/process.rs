use std::ffi::OsStr;

use async_trait::async_trait;
use sysinfo::{
    ProcessesToUpdate,
    System,
};
use tokio::task;
use tokio_util::sync::CancellationToken;

use crate::{
    context::ProcessManager,
    DomainError,
    Outcome,
};

fn process_table() -> System {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    system
}

/// [`ProcessManager`] reading the host's process table.
/// Process names match if they contain the requested name.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessManager;

impl SystemProcessManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessManager for SystemProcessManager {
    async fn is_process_running(&self, process_name: &str) -> bool {
        let name = process_name.to_string();
        let running = task::spawn_blocking(move || {
            process_table()
                .processes_by_name(OsStr::new(&name))
                .next()
                .is_some()
        })
        .await;

        running.unwrap_or_else(|error| {
            log::warn!("Process lookup for {} failed: {}", process_name, error);
            false
        })
    }

    async fn kill_process(
        &self,
        process_name: &str,
        cancel: &CancellationToken,
    ) -> Outcome<bool> {
        if cancel.is_cancelled() {
            return Err(DomainError::invalid_operation(format!(
                "Cancelled before killing {}",
                process_name
            )));
        }

        let process_name = process_name.to_string();
        task::spawn_blocking(move || {
            let system = process_table();
            let mut killed = false;
            for process in system.processes_by_name(OsStr::new(&process_name)) {
                if process.kill() {
                    log::debug!("Killed {} ({})", process_name, process.pid());
                    killed = true;
                }
            }
            killed
        })
        .await
        .map_err(|error| DomainError::invalid_operation(format!("Process task failed: {}", error)))
    }
}
