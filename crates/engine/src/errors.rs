use thiserror::Error;
use uuid::Uuid;

use crate::models::section::SectionType;
use crate::models::document::Variant;

/// Engine-level error type.
/// Every variant is local and recoverable: a failed operation leaves the
/// document untouched, and callers decide how (or whether) to surface it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("section type '{section_type}' is not allowed for variant '{variant}'")]
    InvalidSectionType {
        variant: Variant,
        section_type: SectionType,
    },

    #[error("a '{0}' section already exists and the type is not repeatable")]
    DuplicateSingleton(SectionType),

    #[error("no section with id {0}")]
    SectionNotFound(Uuid),

    #[error("section type '{0}' is required for this variant and cannot be removed")]
    RequiredSectionViolation(SectionType),

    #[error("index {index} is out of range for {len} sections")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("section type '{0}' is not repeatable")]
    NotRepeatable(SectionType),

    #[error("content patch does not match section type '{expected}': {detail}")]
    ContentTypeMismatch {
        expected: SectionType,
        detail: String,
    },

    #[error("fix target not found: {0}")]
    TargetSectionMissing(String),

    #[error("fix payload is malformed: {0}")]
    MalformedFix(String),

    #[error("nothing to undo")]
    CannotUndo,

    #[error("nothing to redo")]
    CannotRedo,

    #[error("import failed: {0}")]
    ImportFailed(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;
