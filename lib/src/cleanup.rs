use crate::{
    module::ModuleName,
    CleanableItem,
    DomainError,
    FileSize,
    Outcome,
};

/// Accumulated outcome of deleting a set of items.
///
/// Results form a monoid: [`CleanupResult::zero`] is the identity of [`CleanupResult::combine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupResult {
    files_deleted: u64,
    space_freed: FileSize,
    errors: Vec<String>,
}

impl CleanupResult {
    pub fn create(files_deleted: i64, space_freed: FileSize) -> Outcome<Self> {
        Self::create_with_errors(files_deleted, space_freed, Vec::new())
    }

    pub fn create_with_errors(
        files_deleted: i64,
        space_freed: FileSize,
        errors: Vec<String>,
    ) -> Outcome<Self> {
        if files_deleted < 0 {
            return Err(DomainError::validation("Files deleted cannot be negative"));
        }

        Ok(Self {
            files_deleted: files_deleted as u64,
            space_freed,
            errors,
        })
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// A single successfully deleted item.
    pub fn deleted(space_freed: FileSize) -> Self {
        Self {
            files_deleted: 1,
            space_freed,
            errors: Vec::new(),
        }
    }

    /// A single failed deletion.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::default()
        }
    }

    pub fn total_files_deleted(&self) -> u64 {
        self.files_deleted
    }

    pub fn total_space_freed(&self) -> FileSize {
        self.space_freed
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_messages(&self) -> &[String] {
        &self.errors
    }

    pub fn combine(&self, other: &CleanupResult) -> CleanupResult {
        let mut errors = Vec::with_capacity(self.errors.len() + other.errors.len());
        errors.extend(self.errors.iter().cloned());
        errors.extend(other.errors.iter().cloned());

        CleanupResult {
            files_deleted: self.files_deleted + other.files_deleted,
            space_freed: self.space_freed + other.space_freed,
            errors,
        }
    }
}

/// What happened to one module during a cleanup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupSummary {
    module: ModuleName,
    total_items_scanned: usize,
    safe_items_found: usize,
    result: CleanupResult,
    skipped: bool,
}

impl CleanupSummary {
    /// Summarize a module which had `items` analyzed and produced `result`.
    ///
    /// `None` stands for a missing item list and is rejected as a validation error,
    /// an empty list is rejected since there would be nothing to summarize.
    pub fn create(
        module: ModuleName,
        items: Option<&[CleanableItem]>,
        result: CleanupResult,
    ) -> Outcome<Self> {
        let items = items.ok_or_else(|| DomainError::validation("items is required"))?;
        if items.is_empty() {
            return Err(DomainError::invalid_operation(
                "Cannot create summary with no items",
            ));
        }

        Ok(Self {
            module,
            total_items_scanned: items.len(),
            safe_items_found: items.iter().filter(|item| item.is_safe_to_delete()).count(),
            result,
            skipped: false,
        })
    }

    /// Summary for a module whose deletion has been declined by the user.
    pub fn skipped(module: ModuleName, items: Option<&[CleanableItem]>) -> Outcome<Self> {
        let mut summary = Self::create(module, items, CleanupResult::zero())?;
        summary.skipped = true;
        Ok(summary)
    }

    pub fn module(&self) -> ModuleName {
        self.module
    }

    pub fn total_items_scanned(&self) -> usize {
        self.total_items_scanned
    }

    pub fn safe_items_found(&self) -> usize {
        self.safe_items_found
    }

    pub fn result(&self) -> &CleanupResult {
        &self.result
    }

    pub fn was_skipped(&self) -> bool {
        self.skipped
    }
}
