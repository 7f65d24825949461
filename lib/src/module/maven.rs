use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{
    analyze_guarded_cache,
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

pub struct MavenModule;

impl MavenModule {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CleanupModule for MavenModule {
    fn name(&self) -> ModuleName {
        ModuleName::Maven
    }

    fn description(&self) -> &str {
        "Maven local repository (~/.m2/repository)"
    }

    fn is_destructive(&self) -> bool {
        false
    }

    fn is_available_on_platform(&self, _os: OperatingSystem) -> bool {
        true
    }

    async fn analyze(
        &self,
        context: &CleanupContext,
        cancel: &CancellationToken,
    ) -> Outcome<ModuleAnalysis> {
        let base = context.environment().maven_repository_path();
        analyze_guarded_cache(context, self.name(), &base, &["mvnd", "mvn"], cancel).await
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
