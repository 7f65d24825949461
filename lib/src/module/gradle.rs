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

const GRADLE: &str = "gradle";

/// Gradle's dependency and build caches.
///
/// Idle Gradle daemons keep file handles into the caches, so they get
/// stopped before anything is deleted.
pub struct GradleModule;

impl GradleModule {
    pub fn new() -> Self {
        Self
    }

    async fn stop_daemons(&self, context: &CleanupContext, cancel: &CancellationToken) {
        let runner = context.command_runner();
        if !runner.is_command_available(GRADLE) {
            return;
        }

        match runner.run(GRADLE, &["--stop"], cancel).await {
            Ok(output) if output.is_successful() => log::debug!("Stopped gradle daemons"),
            Ok(output) => log::warn!("gradle --stop failed: {}", output.standard_error().trim()),
            Err(error) => log::warn!("gradle --stop failed: {}", error),
        }
    }
}

#[async_trait]
impl CleanupModule for GradleModule {
    fn name(&self) -> ModuleName {
        ModuleName::Gradle
    }

    fn description(&self) -> &str {
        "Gradle caches (~/.gradle/caches)"
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
        let base = context.environment().gradle_cache_path();
        analyze_guarded_cache(context, self.name(), &base, &[GRADLE], cancel).await
    }

    async fn clean(
        &self,
        context: &CleanupContext,
        items: &[CleanableItem],
        cancel: &CancellationToken,
    ) -> Outcome<CleanupResult> {
        if !items.is_empty() {
            self.stop_daemons(context, cancel).await;
        }

        delete_items(context, items, cancel).await
    }
}
