use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{
    cache_entries,
    delete_items,
    running_process,
    CleanupModule,
    ModuleName,
};
use crate::{
    CleanableItem,
    CleanupContext,
    CleanupResult,
    ModuleAnalysis,
    OperatingSystem,
    Outcome,
};

/// Downloads which `brew` has not finished yet.
const INCOMPLETE_DOWNLOAD: &str = ".incomplete";

/// Downloaded bottles and source archives kept by Homebrew.
pub struct HomebrewModule;

impl HomebrewModule {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CleanupModule for HomebrewModule {
    fn name(&self) -> ModuleName {
        ModuleName::Homebrew
    }

    fn description(&self) -> &str {
        "Homebrew download cache"
    }

    fn is_destructive(&self) -> bool {
        false
    }

    fn is_available_on_platform(&self, os: OperatingSystem) -> bool {
        os.is_unix()
    }

    async fn analyze(
        &self,
        context: &CleanupContext,
        cancel: &CancellationToken,
    ) -> Outcome<ModuleAnalysis> {
        let base = context.environment().homebrew_cache_path();
        let entries = cache_entries(context, &base, cancel).await?;
        let brew_running = running_process(context, &["brew"]).await.is_some();

        let items = entries
            .into_iter()
            .map(|(path, size)| {
                if brew_running {
                    CleanableItem::create_unsafe(path, size, self.name(), "brew is currently running")
                } else if path.extension() == INCOMPLETE_DOWNLOAD {
                    CleanableItem::create_unsafe(path, size, self.name(), "Download in progress")
                } else {
                    CleanableItem::create_safe(path, size, self.name(), "Cached download")
                }
            })
            .collect();

        ModuleAnalysis::create(self.name(), Some(items))
    }

    async fn clean(
        &self,
        context: &CleanupContext,
        items: &[CleanableItem],
        cancel: &CancellationToken,
    ) -> Outcome<CleanupResult> {
        delete_items(context, items, cancel).await
    }
}
