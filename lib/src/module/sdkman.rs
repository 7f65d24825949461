use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{
    cache_entries,
    delete_items,
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

/// Sub directories of the SDKMAN installation which only hold downloads.
const DOWNLOAD_DIRS: [&str; 2] = ["archives", "tmp"];

pub struct SdkmanModule;

impl SdkmanModule {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CleanupModule for SdkmanModule {
    fn name(&self) -> ModuleName {
        ModuleName::Sdkman
    }

    fn description(&self) -> &str {
        "SDKMAN downloaded archives and temporary files"
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
        let base = context.environment().sdkman_path();

        let mut items = Vec::new();
        for dir in DOWNLOAD_DIRS {
            for (path, size) in cache_entries(context, &base.join(dir)?, cancel).await? {
                items.push(CleanableItem::create_safe(
                    path,
                    size,
                    self.name(),
                    "Installed candidates do not need their archive",
                ));
            }
        }

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
