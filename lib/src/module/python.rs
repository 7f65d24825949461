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

pub struct PythonModule;

impl PythonModule {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CleanupModule for PythonModule {
    fn name(&self) -> ModuleName {
        ModuleName::Python
    }

    fn description(&self) -> &str {
        "pip wheel and HTTP cache"
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
        let base = context.environment().python_cache_path();
        analyze_guarded_cache(context, self.name(), &base, &["pip", "pip3"], cancel).await
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
