use crate::{
    module::ModuleName,
    CleanableItem,
    DomainError,
    FileSize,
    Outcome,
};

/// Everything one module found during analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAnalysis {
    module: ModuleName,
    items: Vec<CleanableItem>,
}

impl ModuleAnalysis {
    pub fn create(module: ModuleName, items: Option<Vec<CleanableItem>>) -> Outcome<Self> {
        let items = items.ok_or_else(|| DomainError::validation("items is required"))?;
        Ok(Self { module, items })
    }

    pub fn empty(module: ModuleName) -> Self {
        Self {
            module,
            items: Vec::new(),
        }
    }

    pub fn module(&self) -> ModuleName {
        self.module
    }

    pub fn items(&self) -> &[CleanableItem] {
        &self.items
    }

    pub fn safe_items(&self) -> Vec<CleanableItem> {
        self.items
            .iter()
            .filter(|item| item.is_safe_to_delete())
            .cloned()
            .collect()
    }

    pub fn total_size(&self) -> FileSize {
        self.items.iter().map(CleanableItem::size).sum()
    }

    pub fn safe_item_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.is_safe_to_delete())
            .count()
    }

    pub fn unsafe_item_count(&self) -> usize {
        self.item_count() - self.safe_item_count()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The analyses of all modules selected for a run, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    analyses: Vec<ModuleAnalysis>,
}

impl AnalysisReport {
    pub fn create(analyses: Option<Vec<ModuleAnalysis>>) -> Outcome<Self> {
        let analyses =
            analyses.ok_or_else(|| DomainError::validation("moduleAnalyses is required"))?;
        Ok(Self { analyses })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn analyses(&self) -> &[ModuleAnalysis] {
        &self.analyses
    }

    pub fn analysis_for(&self, module: ModuleName) -> Option<&ModuleAnalysis> {
        self.analyses
            .iter()
            .find(|analysis| analysis.module() == module)
    }

    pub fn total_size(&self) -> FileSize {
        self.analyses.iter().map(ModuleAnalysis::total_size).sum()
    }

    pub fn total_safe_size(&self) -> FileSize {
        self.analyses
            .iter()
            .flat_map(ModuleAnalysis::items)
            .filter(|item| item.is_safe_to_delete())
            .map(CleanableItem::size)
            .sum()
    }

    pub fn total_item_count(&self) -> usize {
        self.analyses.iter().map(ModuleAnalysis::item_count).sum()
    }

    pub fn module_count(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.iter().all(ModuleAnalysis::is_empty)
    }
}
