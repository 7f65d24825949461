use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    module::ModuleName,
    AnalysisReport,
    CleanupContext,
    DomainError,
    ModuleRegistry,
    Outcome,
};

/// Analyze the requested modules without deleting anything.
pub struct AnalyzeUseCase {
    registry: Arc<ModuleRegistry>,
    context: CleanupContext,
}

impl AnalyzeUseCase {
    pub fn new(registry: Arc<ModuleRegistry>, context: CleanupContext) -> Self {
        Self { registry, context }
    }

    /// Analyses are reported in the order the modules have been requested.
    /// Modules not supported on the current platform are left out.
    ///
    /// The first failing module aborts the whole analysis, a partial report is never returned.
    pub async fn execute(
        &self,
        modules: &[ModuleName],
        cancel: &CancellationToken,
    ) -> Outcome<AnalysisReport> {
        let os = self.context.environment().current_os();
        let mut analyses = Vec::with_capacity(modules.len());

        for name in modules {
            if cancel.is_cancelled() {
                return Err(DomainError::invalid_operation("Analysis has been cancelled"));
            }

            let module = self.registry.for_name(*name)?;
            if !module.is_available_on_platform(os) {
                log::debug!("Skipping {} as it is not available on {}", name, os);
                self.context
                    .output()
                    .debug(&format!("{} is not available on {}", name, os));
                continue;
            }

            log::debug!("Analyzing {}", name);
            let analysis = module.analyze(&self.context, cancel).await.map_err(|error| {
                log::warn!("Analysis of {} failed: {}", name, error);
                error
            })?;

            log::debug!(
                "{} found {} items ({})",
                name,
                analysis.item_count(),
                analysis.total_size()
            );
            analyses.push(analysis);
        }

        AnalysisReport::create(Some(analyses))
    }
}
