//! Fix descriptors: externally produced change suggestions consumed by the
//! auto-fix protocol. The engine never creates these; the analyzer does.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::section::SectionType;

/// Category of issue a fix addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    Length,
    Summary,
    Readability,
    Formatting,
    Quantification,
    Contact,
    Dates,
    Bullets,
    Keywords,
}

/// Action the fix performs when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    Add,
    Remove,
    Modify,
    Reformat,
    /// Informational only; applying it never mutates the document.
    Suggest,
}

/// Reference to the fix's target. Analyzer responses may describe a stale
/// document, so id references can dangle; resolution failures are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SectionRef {
    ById { id: Uuid },
    ByType { section_type: SectionType },
    Contact,
}

/// A single externally supplied fix suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixDescriptor {
    pub fix_type: FixType,
    pub action: FixAction,
    pub section: SectionRef,
    /// Entry-level target within the section, when the fix is narrower than
    /// a whole section.
    #[serde(default)]
    pub entry_id: Option<Uuid>,
    pub description: String,
    #[serde(default)]
    pub original_value: Option<Value>,
    #[serde(default)]
    pub suggested_value: Option<Value>,
    /// Safe to apply without user confirmation.
    #[serde(default)]
    pub auto_applicable: bool,
    #[serde(default)]
    pub metadata: Value,
}

/// Analyzer scan depth, forwarded to the external scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    Basic,
    Ats,
    Expert,
}

/// Result of one analyzer run over a document snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Overall quality score, 0..=100.
    pub overall_score: f64,
    pub fixes: Vec<FixDescriptor>,
}
