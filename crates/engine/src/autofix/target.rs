//! Resolution of a fix's target location inside section content.
//!
//! A fix edits either a single text field (summary, paragraph) or a list of
//! strings (experience bullets, project highlights, skill items, ...). The
//! target borrows into the content so the apply step mutates in place; the
//! caller clones the document first, keeping the operation all-or-nothing.

use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::section::SectionContent;

#[derive(Debug)]
pub(super) enum ContentTarget<'a> {
    Text(&'a mut String),
    List(&'a mut Vec<String>),
}

impl<'a> ContentTarget<'a> {
    /// Resolves the editable location for this content, honoring an
    /// entry-level reference when given. A dangling `entry_id` or a section
    /// with no entries fails with `TargetSectionMissing`.
    pub(super) fn resolve(
        content: &'a mut SectionContent,
        entry_id: Option<Uuid>,
    ) -> EngineResult<Self> {
        let missing_entry = |id: Option<Uuid>| {
            EngineError::TargetSectionMissing(match id {
                Some(id) => format!("entry {id} no longer exists"),
                None => "section has no entries to target".to_string(),
            })
        };

        match content {
            SectionContent::Summary { text } | SectionContent::Paragraph { text, .. } => {
                Ok(ContentTarget::Text(text))
            }
            SectionContent::Experience { entries } => {
                let entry = match entry_id {
                    Some(id) => entries.iter_mut().find(|e| e.id == id),
                    None => entries.first_mut(),
                }
                .ok_or_else(|| missing_entry(entry_id))?;
                Ok(ContentTarget::List(&mut entry.bullets))
            }
            SectionContent::Projects { entries } => {
                let entry = match entry_id {
                    Some(id) => entries.iter_mut().find(|e| e.id == id),
                    None => entries.first_mut(),
                }
                .ok_or_else(|| missing_entry(entry_id))?;
                Ok(ContentTarget::List(&mut entry.highlights))
            }
            SectionContent::Skills { entries } => {
                let entry = match entry_id {
                    Some(id) => entries.iter_mut().find(|e| e.id == id),
                    None => entries.first_mut(),
                }
                .ok_or_else(|| missing_entry(entry_id))?;
                Ok(ContentTarget::List(&mut entry.items))
            }
            SectionContent::Education { entries } => {
                let entry = match entry_id {
                    Some(id) => entries.iter_mut().find(|e| e.id == id),
                    None => entries.first_mut(),
                }
                .ok_or_else(|| missing_entry(entry_id))?;
                Ok(ContentTarget::List(&mut entry.honors))
            }
            SectionContent::Publications { entries } => {
                let entry = match entry_id {
                    Some(id) => entries.iter_mut().find(|e| e.id == id),
                    None => entries.first_mut(),
                }
                .ok_or_else(|| missing_entry(entry_id))?;
                Ok(ContentTarget::List(&mut entry.authors))
            }
            SectionContent::Certifications { .. } => Err(EngineError::TargetSectionMissing(
                "certification entries carry no free-text values to fix".to_string(),
            )),
        }
    }

    /// `add` semantics: set an empty text field, append a missing list item.
    /// Values already present are left alone.
    pub(super) fn ensure_present(&mut self, value: &str) {
        match self {
            ContentTarget::Text(text) => {
                if text.trim().is_empty() {
                    **text = value.to_string();
                }
            }
            ContentTarget::List(items) => {
                if !items.iter().any(|i| i == value) {
                    items.push(value.to_string());
                }
            }
        }
    }

    /// `remove` semantics: delete the value where present, otherwise no-op.
    pub(super) fn remove_value(&mut self, value: &str) {
        match self {
            ContentTarget::Text(text) => {
                if text.as_str() == value {
                    text.clear();
                }
            }
            ContentTarget::List(items) => items.retain(|i| i != value),
        }
    }

    /// `modify`/`reformat` semantics: replace `original` with `value`. When
    /// the replacement already happened (original gone, value present) this
    /// is a no-op, which is what makes re-application idempotent. A stale
    /// original that matches nothing is also a no-op: the document has
    /// drifted since analysis and there is nothing safe to replace.
    pub(super) fn replace_value(&mut self, original: Option<&str>, value: &str) {
        match self {
            ContentTarget::Text(text) => {
                let matches_original = original.map(|o| text.as_str() == o).unwrap_or(true);
                if text.as_str() != value && matches_original {
                    **text = value.to_string();
                }
            }
            ContentTarget::List(items) => {
                if items.iter().any(|i| i == value) {
                    return;
                }
                let Some(original) = original else {
                    return;
                };
                if let Some(position) = items.iter().position(|i| i == original) {
                    items[position] = value.to_string();
                }
            }
        }
    }
}
