//! Editor session: the one live document plus its history.
//!
//! Re-architecture of the original builder's global store as an owned value:
//! all document state reachable from exactly one `EditorSession`, mutations
//! expressed as pure functions, and a checkpoint recorded after every
//! semantically complete edit. There is one logical writer (the UI event
//! loop), so no locking.

use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::autofix::{self, ApplySummary};
use crate::boundary::Analyzer;
use crate::config::ValidationConfig;
use crate::errors::EngineResult;
use crate::history::DocumentHistory;
use crate::models::document::{Document, Variant};
use crate::models::fix::{AnalysisReport, FixDescriptor, ScanMode};
use crate::models::section::{Section, SectionType};
use crate::mutation::{self, ContactPatch};
use crate::validation::{self, ValidationWarning};

pub struct EditorSession {
    history: DocumentHistory,
    validation_config: ValidationConfig,
}

/// What loading an imported document changed to make it satisfy its
/// variant's policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Required section types that were missing and inserted empty.
    pub inserted: Vec<SectionType>,
    /// Ids of sections dropped because the variant disallows their type.
    pub removed_section_ids: Vec<Uuid>,
}

impl EditorSession {
    /// New session over a fresh document seeded with the variant defaults.
    pub fn new(variant: Variant, title: impl Into<String>) -> Self {
        Self::from_document(Document::new(variant, title)).0
    }

    /// Session over an existing document (e.g. the import producer's
    /// output). The document is normalized against its variant the same way
    /// `switch_variant` normalizes: disallowed sections are dropped and
    /// reported, missing required sections are inserted empty. The variant
    /// invariants hold from the first edit.
    pub fn from_document(mut document: Document) -> (Self, ImportReport) {
        let config = document.variant.config();
        let mut report = ImportReport::default();

        document.sections.retain(|section| {
            let keep = config.allows(section.section_type());
            if !keep {
                report.removed_section_ids.push(section.id);
            }
            keep
        });
        for &required in config.required_sections {
            if document.sections_of_type(required).is_empty() {
                let order = document.next_order();
                document.sections.push(Section::new(required, order));
                report.inserted.push(required);
            }
        }
        if report != ImportReport::default() {
            info!(
                inserted = ?report.inserted,
                removed = report.removed_section_ids.len(),
                "normalized document on load"
            );
        }
        (
            EditorSession {
                history: DocumentHistory::new(document),
                validation_config: ValidationConfig::default(),
            },
            report,
        )
    }

    pub fn with_validation_config(mut self, config: ValidationConfig) -> Self {
        self.validation_config = config;
        self
    }

    /// The live document.
    pub fn document(&self) -> &Document {
        self.history.present()
    }

    // ── Mutation operations (each checkpoints on success) ──────────────────

    pub fn add_section(&mut self, section_type: SectionType) -> EngineResult<Uuid> {
        let next = mutation::add_section(self.document(), section_type)?;
        let id = next
            .sections_in_order()
            .last()
            .map(|s| s.id)
            .expect("add_section produced a section");
        debug!(%id, %section_type, "section added");
        self.commit(next);
        Ok(id)
    }

    pub fn remove_section(&mut self, id: Uuid) -> EngineResult<()> {
        let next = mutation::remove_section(self.document(), id)?;
        debug!(%id, "section removed");
        self.commit(next);
        Ok(())
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> EngineResult<()> {
        let next = mutation::reorder_sections(self.document(), from, to)?;
        self.commit(next);
        Ok(())
    }

    pub fn duplicate_section(&mut self, id: Uuid) -> EngineResult<Uuid> {
        let next = mutation::duplicate_section(self.document(), id)?;
        let copy_id = next
            .sections
            .iter()
            .map(|s| s.id)
            .find(|candidate| self.document().section(*candidate).is_none())
            .expect("duplicate produced a new section");
        self.commit(next);
        Ok(copy_id)
    }

    pub fn toggle_section_visibility(&mut self, id: Uuid) -> EngineResult<()> {
        let next = mutation::toggle_section_visibility(self.document(), id)?;
        self.commit(next);
        Ok(())
    }

    pub fn update_section_content(&mut self, id: Uuid, patch: &Value) -> EngineResult<()> {
        let next = mutation::update_section_content(self.document(), id, patch)?;
        self.commit(next);
        Ok(())
    }

    pub fn update_contact(&mut self, patch: &ContactPatch) -> EngineResult<()> {
        let next = mutation::update_contact(self.document(), patch)?;
        self.commit(next);
        Ok(())
    }

    /// Switches variant, returning the ids of dropped sections so the caller
    /// can tell the user what was lost.
    pub fn switch_variant(&mut self, new_variant: Variant) -> EngineResult<Vec<Uuid>> {
        let switch = mutation::switch_variant(self.document(), new_variant)?;
        if !switch.removed_section_ids.is_empty() {
            info!(
                removed = switch.removed_section_ids.len(),
                %new_variant,
                "variant switch dropped sections"
            );
        }
        self.commit(switch.document);
        Ok(switch.removed_section_ids)
    }

    // ── History ────────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> EngineResult<()> {
        self.history.undo()?;
        Ok(())
    }

    pub fn redo(&mut self) -> EngineResult<()> {
        self.history.redo()?;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Validation ─────────────────────────────────────────────────────────

    /// Local advisory warnings; never blocks an edit.
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate_with(self.document(), &self.validation_config)
    }

    // ── Auto-fix ───────────────────────────────────────────────────────────

    /// Applies a single fix as an explicit user action (one checkpoint).
    pub fn apply_fix(&mut self, fix: &FixDescriptor) -> EngineResult<()> {
        let next = autofix::apply_fix(self.document(), fix)?;
        self.commit(next);
        Ok(())
    }

    /// Applies a batch of fixes; one checkpoint for the whole batch so a
    /// single undo reverses it. Skipped fixes are reported in the summary.
    pub fn apply_fixes(&mut self, fixes: &[FixDescriptor]) -> ApplySummary {
        let (next, summary) = autofix::apply_all(self.document(), fixes);
        info!(
            applied = summary.applied.len(),
            skipped = summary.skipped.len(),
            "applied fix batch"
        );
        self.commit(next);
        summary
    }

    // ── External analysis ──────────────────────────────────────────────────

    /// Sends the current document to the external analyzer. Purely a read:
    /// the session is free to keep mutating while the caller awaits, and the
    /// returned fixes are applied (if at all) through `apply_fixes`.
    pub async fn analyze(
        &self,
        analyzer: &dyn Analyzer,
        mode: ScanMode,
    ) -> EngineResult<AnalysisReport> {
        let doc = self.document();
        analyzer
            .analyze(doc, mode, doc.metadata.industry.as_deref())
            .await
    }

    /// Records `next` as a checkpoint unless the operation was a no-op.
    fn commit(&mut self, mut next: Document) {
        if next == *self.document() {
            return;
        }
        next.updated_at = chrono::Utc::now();
        self.history.checkpoint(next);
    }
}
