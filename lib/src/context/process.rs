use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::Outcome;

/// Access to the process table of the host.
#[async_trait]
pub trait ProcessManager: Send + Sync {
    async fn is_process_running(&self, process_name: &str) -> bool;

    /// Terminate all processes matching the name.
    /// Returns whether at least one process has been found and terminated.
    async fn kill_process(&self, process_name: &str, cancel: &CancellationToken)
        -> Outcome<bool>;
}
