use crate::{
    module::ModuleName,
    DomainError,
    FilePath,
    FileSize,
    Outcome,
};

/// A cache artefact discovered by a module together with its safety verdict.
///
/// Items are immutable. Changing the verdict yields a new item so that
/// reports holding the previous one stay untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanableItem {
    path: FilePath,
    size: FileSize,
    module: ModuleName,
    safe_to_delete: bool,
    reason: String,
}

impl CleanableItem {
    pub fn create_safe(
        path: FilePath,
        size: FileSize,
        module: ModuleName,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path,
            size,
            module,
            safe_to_delete: true,
            reason: reason.into(),
        }
    }

    pub fn create_unsafe(
        path: FilePath,
        size: FileSize,
        module: ModuleName,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path,
            size,
            module,
            safe_to_delete: false,
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &FilePath {
        &self.path
    }

    pub fn size(&self) -> FileSize {
        self.size
    }

    pub fn module(&self) -> ModuleName {
        self.module
    }

    pub fn is_safe_to_delete(&self) -> bool {
        self.safe_to_delete
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Confirm the item may be handed to a deletion.
    pub fn mark_for_deletion(&self) -> Outcome<&Self> {
        if !self.safe_to_delete {
            return Err(DomainError::invalid_operation(
                "Cannot mark unsafe item for deletion",
            ));
        }

        Ok(self)
    }

    pub fn mark_as_unsafe(&self, reason: impl Into<String>) -> Outcome<Self> {
        if !self.safe_to_delete {
            return Err(DomainError::invalid_operation(
                "Item is already marked as unsafe",
            ));
        }

        Ok(Self {
            safe_to_delete: false,
            reason: reason.into(),
            ..self.clone()
        })
    }

    pub fn mark_as_safe(&self, reason: impl Into<String>) -> Outcome<Self> {
        if self.safe_to_delete {
            return Err(DomainError::invalid_operation(
                "Item is already marked as safe",
            ));
        }

        Ok(Self {
            safe_to_delete: true,
            reason: reason.into(),
            ..self.clone()
        })
    }
}
