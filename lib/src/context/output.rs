use crate::{
    AnalysisReport,
    CleanupSummary,
};

/// Presentation of progress and results to the user.
pub trait OutputFormatter: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);

    fn section(&self, title: &str);

    fn display_banner(&self, version: &str);
    fn display_analysis_report(&self, report: &AnalysisReport);
    fn display_completion(&self, summaries: &[CleanupSummary]);
}
