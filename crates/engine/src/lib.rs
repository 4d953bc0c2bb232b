//! folio-engine: document/section state engine for resume, CV, and cover
//! letter builders.
//!
//! The crate owns the in-memory document model and everything that mutates
//! it: typed section content, the pure mutation operations, snapshot-based
//! undo/redo, local validation, and the protocol that applies externally
//! produced auto-fixes. Rendering, import parsing, persistence, and the
//! scoring service sit behind the async traits in [`boundary`].
//!
//! Typical embedding:
//!
//! ```
//! use folio_engine::{EditorSession, SectionType, Variant};
//!
//! let mut session = EditorSession::new(Variant::Resume, "My Resume");
//! let projects = session.add_section(SectionType::Projects).unwrap();
//! session.undo().unwrap();
//! assert!(session.document().section(projects).is_none());
//! ```

pub mod autofix;
pub mod boundary;
pub mod config;
pub mod errors;
pub mod history;
pub mod models;
pub mod mutation;
pub mod session;
pub mod validation;

pub use autofix::{apply_all, apply_fix, ApplySummary, SkipReason};
pub use boundary::{Analyzer, DocumentImporter, DocumentStore, ExportFormat};
pub use config::{ValidationConfig, VariantConfig};
pub use errors::{EngineError, EngineResult};
pub use history::DocumentHistory;
pub use models::document::{ContactInfo, Document, DocumentMetadata, Variant};
pub use models::fix::{
    AnalysisReport, FixAction, FixDescriptor, FixType, ScanMode, SectionRef,
};
pub use models::section::{Section, SectionContent, SectionType};
pub use mutation::ContactPatch;
pub use session::{EditorSession, ImportReport};
pub use validation::{Severity, ValidationRule, ValidationWarning};
