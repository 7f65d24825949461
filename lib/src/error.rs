use thiserror::Error;

/// Result type used by every fallible operation of the cleanup pipeline.
pub type Outcome<T> = Result<T, DomainError>;

/// Machine readable failure kind of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Validation,
    NotFound,
    InvalidOperation,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidOperation => "INVALID_OPERATION",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("[VALIDATION_ERROR] {0}")]
    Validation(String),

    #[error("[NOT_FOUND] {entity} with ID {id} not found")]
    NotFound { entity: String, id: String },

    #[error("[INVALID_OPERATION] {0}")]
    InvalidOperation(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidOperation(_) => ErrorCode::InvalidOperation,
        }
    }

    /// Human readable message without the error code prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(message) | Self::InvalidOperation(message) => message.clone(),
            Self::NotFound { entity, id } => format!("{} with ID {} not found", entity, id),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::NotFound
    }

    pub fn is_invalid_operation(&self) -> bool {
        self.code() == ErrorCode::InvalidOperation
    }

    /// Case insensitive search within the error message.
    pub fn message_contains(&self, text: &str) -> bool {
        self.message()
            .to_lowercase()
            .contains(&text.to_lowercase())
    }
}

/// Combinators on top of [`Outcome`] which the standard `Result` does not offer.
pub trait OutcomeExt<T> {
    /// Handle both variants and collapse them into a single value.
    fn fold<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(DomainError) -> R) -> R;
}

impl<T> OutcomeExt<T> for Outcome<T> {
    fn fold<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(DomainError) -> R) -> R {
        match self {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }
}
