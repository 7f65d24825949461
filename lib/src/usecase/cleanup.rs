use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::AnalyzeUseCase;
use crate::{
    module::{
        CleanupModule,
        ModuleName,
    },
    AnalysisReport,
    CleanupContext,
    CleanupResult,
    CleanupSummary,
    FileSize,
    ModuleAnalysis,
    ModuleRegistry,
    Outcome,
};

/// Analyze the requested modules and delete everything which is safe to delete.
///
/// Destructive modules only delete after the user confirmed it. Failing deletions
/// are collected in the module's summary and do not stop the run. Every requested
/// module must have found something: a module without items cannot be summarized
/// and fails the run.
pub struct CleanupUseCase {
    registry: Arc<ModuleRegistry>,
    context: CleanupContext,
    analyze: AnalyzeUseCase,
}

impl CleanupUseCase {
    pub fn new(registry: Arc<ModuleRegistry>, context: CleanupContext) -> Self {
        Self {
            analyze: AnalyzeUseCase::new(registry.clone(), context.clone()),
            registry,
            context,
        }
    }

    /// One summary per analyzed module.
    ///
    /// On cancellation the summaries of the modules processed so far are returned.
    pub async fn execute(
        &self,
        modules: &[ModuleName],
        cancel: &CancellationToken,
    ) -> Outcome<Vec<CleanupSummary>> {
        let report = self.analyze.execute(modules, cancel).await?;
        self.clean_report(&report, cancel).await
    }

    /// Clean the modules of an analysis which has already been made.
    pub async fn clean_report(
        &self,
        report: &AnalysisReport,
        cancel: &CancellationToken,
    ) -> Outcome<Vec<CleanupSummary>> {
        let mut summaries = Vec::with_capacity(report.module_count());
        for analysis in report.analyses() {
            if cancel.is_cancelled() {
                log::info!("Cleanup cancelled after {} modules", summaries.len());
                break;
            }

            let module = self.registry.for_name(analysis.module())?;
            self.context.output().section(module.description());

            summaries.push(self.process(module.as_ref(), analysis, cancel).await?);
        }

        Ok(summaries)
    }

    async fn process(
        &self,
        module: &dyn CleanupModule,
        analysis: &ModuleAnalysis,
        cancel: &CancellationToken,
    ) -> Outcome<CleanupSummary> {
        let output = self.context.output();
        let name = module.name();

        let safe_items = analysis.safe_items();
        if safe_items.is_empty() {
            output.info(&format!(
                "{}: none of the {} items are safe to delete",
                name,
                analysis.item_count()
            ));
            return CleanupSummary::create(name, Some(analysis.items()), CleanupResult::zero());
        }

        if module.is_destructive() {
            let size = safe_items.iter().map(|item| item.size()).sum::<FileSize>();
            let message = format!("Delete {} items ({}) from {}?", safe_items.len(), size, name);
            if !self
                .context
                .user_interaction()
                .confirm(&message, true, cancel)
                .await
            {
                log::debug!("Cleanup of {} declined", name);
                output.warning(&format!("{}: skipped", name));
                return CleanupSummary::skipped(name, Some(analysis.items()));
            }
        }

        let result = module.clean(&self.context, &safe_items, cancel).await?;
        if result.has_errors() {
            for error in result.error_messages() {
                output.error(error);
            }
            output.warning(&format!(
                "{}: {} files deleted, {} errors",
                name,
                result.total_files_deleted(),
                result.error_messages().len()
            ));
        } else {
            output.success(&format!(
                "{}: {} files deleted, {} freed",
                name,
                result.total_files_deleted(),
                result.total_space_freed()
            ));
        }

        CleanupSummary::create(name, Some(analysis.items()), result)
    }
}
