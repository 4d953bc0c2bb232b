//! External collaborator boundaries, as swappable async traits.
//!
//! The engine is pure and in-memory; analysis, persistence, and import are
//! request/response collaborators the orchestrator awaits. Implementations
//! live with the embedding application and are carried as `Arc<dyn _>`.
//! While a call is in flight the user keeps editing, so responses may
//! describe a stale document; the autofix protocol absorbs that with
//! recoverable `TargetSectionMissing` failures.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::EngineResult;
use crate::models::document::Document;
use crate::models::fix::{AnalysisReport, ScanMode};

/// External analysis/scoring service: `(document, mode, industry) ->
/// (score, fixes)`. Scoring heuristics are entirely the implementation's
/// concern.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        document: &Document,
        mode: ScanMode,
        industry: Option<&str>,
    ) -> EngineResult<AnalysisReport>;
}

/// Export formats the persistence boundary can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Pdf,
}

/// Persistence boundary. `save` may assign or confirm the document id; the
/// returned document is authoritative and must be field-for-field equal to
/// what a lossless round-trip of the input would give.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn save(&self, document: &Document) -> EngineResult<Document>;
    async fn export(&self, document_id: Uuid, format: ExportFormat) -> EngineResult<Vec<u8>>;
}

/// Import producer (PDF/DOCX parsing lives behind this). The engine treats
/// the result as an ordinary document; `EditorSession::from_document`
/// normalizes it against the variant invariants.
#[async_trait]
pub trait DocumentImporter: Send + Sync {
    async fn import(&self, bytes: &[u8], filename: &str) -> EngineResult<Document>;
}
