// Validation engine: declarative, order-independent rules producing
// severity-ranked warnings. Advisory only, nothing here blocks an edit.
// Independent of the external analyzer; these run locally on every edit.

pub mod rules;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ValidationConfig;
use crate::models::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Identifies the rule that produced a warning, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    ContactIncomplete,
    ContactEmailFormat,
    EmptyRequiredSection,
    SummaryLength,
    PageOverflow,
    UnquantifiedBullets,
    HiddenRequiredSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub rule: ValidationRule,
    pub severity: Severity,
    #[serde(default)]
    pub section_id: Option<Uuid>,
    pub message: String,
    pub auto_fixable: bool,
}

/// Validates with default tunables.
pub fn validate(doc: &Document) -> Vec<ValidationWarning> {
    validate_with(doc, &ValidationConfig::default())
}

/// Runs every rule and returns warnings ordered errors-first, then warnings,
/// then info; within a severity, rule-declaration order is preserved.
/// Deterministic for a given document value.
pub fn validate_with(doc: &Document, config: &ValidationConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    rules::contact_completeness(doc, &mut warnings);
    rules::contact_email_format(doc, &mut warnings);
    rules::empty_required_sections(doc, &mut warnings);
    rules::summary_length(doc, config, &mut warnings);
    rules::page_overflow(doc, config, &mut warnings);
    rules::unquantified_bullets(doc, &mut warnings);
    rules::hidden_required_sections(doc, &mut warnings);

    // Declaration order is already in place; a stable sort by severity
    // yields the errors/warnings/info grouping without reshuffling groups.
    warnings.sort_by_key(|w| w.severity);
    warnings
}
