use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Asks the user before something irreversible happens.
#[async_trait]
pub trait UserInteraction: Send + Sync {
    /// Yes/no question. A cancelled prompt counts as "no".
    async fn confirm(&self, message: &str, destructive: bool, cancel: &CancellationToken) -> bool;
}
