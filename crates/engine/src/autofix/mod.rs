//! Auto-fix application protocol.
//!
//! Consumes externally produced `FixDescriptor`s and applies them to the
//! document deterministically. Applying the same fix twice leaves the
//! document identical to applying it once: `add` means "ensure present",
//! `remove` means "ensure absent", and `modify`/`reformat` treat an already
//! replaced value as done. `suggest` never mutates anything.
//!
//! Analyzer responses can describe a document the user has since edited, so
//! every id lookup failure is the recoverable `TargetSectionMissing`, never
//! a panic.

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::document::Document;
use crate::models::fix::{FixAction, FixDescriptor, SectionRef};

mod target;

use target::ContentTarget;

/// Why a fix in a batch was not applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// `auto_applicable` was false; needs user confirmation.
    NotAutoApplicable,
    /// `suggest` action: informational by contract.
    Informational,
    /// Application failed; the batch continues.
    Failed(String),
}

/// Outcome of `apply_all`. Applied counts exclude skipped fixes of every
/// kind, including `suggest`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplySummary {
    pub applied: Vec<usize>,
    pub skipped: Vec<(usize, SkipReason)>,
}

impl ApplySummary {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// Applies a single fix, returning the new document.
///
/// `suggest` fixes return the document unchanged. The `auto_applicable` flag
/// is NOT consulted here; single application is an explicit user action,
/// only the batch path skips non-auto fixes.
pub fn apply_fix(doc: &Document, fix: &FixDescriptor) -> EngineResult<Document> {
    if fix.action == FixAction::Suggest {
        return Ok(doc.clone());
    }

    match fix.section {
        SectionRef::Contact => apply_contact_fix(doc, fix),
        SectionRef::ById { id } => {
            let section = doc.section(id).ok_or_else(|| {
                EngineError::TargetSectionMissing(format!("section id {id} no longer exists"))
            })?;
            apply_section_fix(doc, section.id, fix)
        }
        SectionRef::ByType { section_type } => {
            let section = doc.first_section_of_type(section_type).ok_or_else(|| {
                EngineError::TargetSectionMissing(format!(
                    "no '{section_type}' section in the document"
                ))
            })?;
            apply_section_fix(doc, section.id, fix)
        }
    }
}

/// Applies fixes in the given order, skipping non-auto-applicable and
/// informational fixes and continuing past failures. A failed fix surfaces
/// in the summary, never as an aborted batch.
///
/// Callers re-run the external analyzer afterwards; the protocol does not
/// re-validate locally.
pub fn apply_all(doc: &Document, fixes: &[FixDescriptor]) -> (Document, ApplySummary) {
    let mut current = doc.clone();
    let mut summary = ApplySummary::default();

    for (index, fix) in fixes.iter().enumerate() {
        if fix.action == FixAction::Suggest {
            summary.skipped.push((index, SkipReason::Informational));
            continue;
        }
        if !fix.auto_applicable {
            summary.skipped.push((index, SkipReason::NotAutoApplicable));
            continue;
        }
        match apply_fix(&current, fix) {
            Ok(next) => {
                current = next;
                summary.applied.push(index);
            }
            Err(err) => {
                warn!(index, %err, "skipping failed fix in batch");
                summary.skipped.push((index, SkipReason::Failed(err.to_string())));
            }
        }
    }

    debug!(
        applied = summary.applied.len(),
        skipped = summary.skipped.len(),
        "fix batch applied"
    );
    (current, summary)
}

fn apply_contact_fix(doc: &Document, fix: &FixDescriptor) -> EngineResult<Document> {
    let mut next = doc.clone();
    match fix.action {
        // Ensure-present: fill only empty fields from the suggested object.
        FixAction::Add | FixAction::Modify | FixAction::Reformat => {
            let Some(Value::Object(fields)) = &fix.suggested_value else {
                return Err(EngineError::MalformedFix(
                    "contact fix requires an object suggested_value".to_string(),
                ));
            };
            let overwrite = fix.action != FixAction::Add;
            for (key, value) in fields {
                let Some(text) = value.as_str() else { continue };
                set_contact_field(&mut next, key, text, overwrite);
            }
            Ok(next)
        }
        FixAction::Remove => {
            if let Some(Value::Object(fields)) = &fix.original_value {
                for key in fields.keys() {
                    clear_contact_field(&mut next, key);
                }
            }
            Ok(next)
        }
        FixAction::Suggest => unreachable!("suggest handled by apply_fix"),
    }
}

fn set_contact_field(doc: &mut Document, key: &str, value: &str, overwrite: bool) {
    let contact = &mut doc.contact;
    match key {
        "full_name" => {
            if overwrite || contact.full_name.trim().is_empty() {
                contact.full_name = value.to_string();
            }
        }
        "email" => {
            if overwrite || contact.email.trim().is_empty() {
                contact.email = value.to_string();
            }
        }
        "phone" | "location" | "linkedin" | "github" | "website" => {
            let field = optional_contact_field(contact, key);
            if overwrite || field.is_none() {
                *field = Some(value.to_string());
            }
        }
        _ => {}
    }
}

fn clear_contact_field(doc: &mut Document, key: &str) {
    let contact = &mut doc.contact;
    match key {
        "full_name" => contact.full_name.clear(),
        "email" => contact.email.clear(),
        "phone" | "location" | "linkedin" | "github" | "website" => {
            *optional_contact_field(contact, key) = None;
        }
        _ => {}
    }
}

fn optional_contact_field<'a>(
    contact: &'a mut crate::models::document::ContactInfo,
    key: &str,
) -> &'a mut Option<String> {
    match key {
        "phone" => &mut contact.phone,
        "location" => &mut contact.location,
        "linkedin" => &mut contact.linkedin,
        "github" => &mut contact.github,
        "website" => &mut contact.website,
        _ => unreachable!("caller matched the key"),
    }
}

fn apply_section_fix(doc: &Document, section_id: Uuid, fix: &FixDescriptor) -> EngineResult<Document> {
    let mut next = doc.clone();
    let section = next.section_mut(section_id).ok_or_else(|| {
        EngineError::TargetSectionMissing(format!("section id {section_id} no longer exists"))
    })?;
    let mut target = ContentTarget::resolve(&mut section.content, fix.entry_id)?;

    let suggested = fix.suggested_value.as_ref().and_then(Value::as_str);
    let original = fix.original_value.as_ref().and_then(Value::as_str);

    match fix.action {
        FixAction::Add => {
            let Some(value) = suggested else {
                return Err(EngineError::MalformedFix(
                    "add fix carries no suggested_value".to_string(),
                ));
            };
            target.ensure_present(value);
        }
        FixAction::Remove => {
            if let Some(value) = original {
                target.remove_value(value);
            }
        }
        FixAction::Modify | FixAction::Reformat => {
            let Some(value) = suggested else {
                return Err(EngineError::MalformedFix(
                    "modify fix carries no suggested_value".to_string(),
                ));
            };
            target.replace_value(original, value);
        }
        FixAction::Suggest => unreachable!("suggest handled by apply_fix"),
    }
    Ok(next)
}
