//! Content updates: shallow-merge patches for section content and contact
//! info. Patches arrive as JSON objects (the shape the editing UI produces)
//! and are merged over the serialized content before being deserialized back
//! into the typed model, so a malformed patch can never leave a torn state.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::document::{ContactInfo, Document};
use crate::models::section::SectionContent;

/// Shallow-merges `patch` into the content of the section with `id`.
///
/// The patch must be a JSON object whose keys are fields of the section's
/// content shape; a `"type"` key, when present, must match the section's
/// type. Anything else fails with `ContentTypeMismatch` and the document is
/// unchanged. Entries supplied without ids get fresh ones on deserialization;
/// a patch repeating an entry id within the section is rejected.
pub fn update_section_content(doc: &Document, id: Uuid, patch: &Value) -> EngineResult<Document> {
    let section = doc.section(id).ok_or(EngineError::SectionNotFound(id))?;
    let expected = section.section_type();

    let mismatch = |detail: String| EngineError::ContentTypeMismatch { expected, detail };

    let patch_map = patch
        .as_object()
        .ok_or_else(|| mismatch("patch must be a JSON object".to_string()))?;

    if let Some(tag) = patch_map.get("type") {
        if tag.as_str() != Some(expected.as_str()) {
            return Err(mismatch(format!(
                "patch is tagged '{}'",
                tag.as_str().unwrap_or("<non-string>")
            )));
        }
    }

    let known_fields = section.content.field_names();
    for key in patch_map.keys() {
        if key != "type" && !known_fields.contains(&key.as_str()) {
            return Err(mismatch(format!("unknown field '{key}'")));
        }
    }

    let serialized =
        serde_json::to_value(&section.content).map_err(|e| EngineError::Internal(e.into()))?;
    let Value::Object(mut merged) = serialized else {
        return Err(EngineError::Internal(anyhow::anyhow!(
            "section content did not serialize to an object"
        )));
    };
    for (key, value) in patch_map {
        if key != "type" {
            merged.insert(key.clone(), value.clone());
        }
    }

    let content: SectionContent = serde_json::from_value(Value::Object(merged))
        .map_err(|e| mismatch(format!("merged content is invalid: {e}")))?;

    let mut seen = HashSet::new();
    for entry_id in content.entry_ids() {
        if !seen.insert(entry_id) {
            return Err(mismatch(format!("duplicate entry id {entry_id}")));
        }
    }

    let mut next = doc.clone();
    match next.section_mut(id) {
        Some(section) => section.content = content,
        None => return Err(EngineError::SectionNotFound(id)),
    }
    Ok(next)
}

/// Partial contact update. Fields left `None` keep their current value;
/// optional contact fields are cleared by passing an explicit empty string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

/// Shallow-merges a contact patch. No format validation happens here; the
/// validation engine reports malformed emails as warnings instead of
/// blocking the edit.
pub fn update_contact(doc: &Document, patch: &ContactPatch) -> EngineResult<Document> {
    let mut next = doc.clone();
    merge_contact(&mut next.contact, patch);
    Ok(next)
}

fn merge_contact(contact: &mut ContactInfo, patch: &ContactPatch) {
    if let Some(full_name) = &patch.full_name {
        contact.full_name = full_name.clone();
    }
    if let Some(email) = &patch.email {
        contact.email = email.clone();
    }
    for (field, value) in [
        (&mut contact.phone, &patch.phone),
        (&mut contact.location, &patch.location),
        (&mut contact.linkedin, &patch.linkedin),
        (&mut contact.github, &patch.github),
        (&mut contact.website, &patch.website),
    ] {
        if let Some(v) = value {
            *field = if v.is_empty() { None } else { Some(v.clone()) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Variant;
    use crate::models::section::{SectionContent, SectionType};
    use serde_json::json;

    fn resume() -> Document {
        Document::new(Variant::Resume, "Test Resume")
    }

    fn summary_id(doc: &Document) -> Uuid {
        doc.first_section_of_type(SectionType::Summary).unwrap().id
    }

    fn experience_id(doc: &Document) -> Uuid {
        doc.first_section_of_type(SectionType::Experience)
            .unwrap()
            .id
    }

    #[test]
    fn test_patch_summary_text() {
        let doc = resume();
        let id = summary_id(&doc);
        let next =
            update_section_content(&doc, id, &json!({"text": "Seasoned engineer."})).unwrap();
        assert_eq!(
            next.section(id).unwrap().content,
            SectionContent::Summary {
                text: "Seasoned engineer.".to_string()
            }
        );
    }

    #[test]
    fn test_patch_with_matching_type_tag_is_accepted() {
        let doc = resume();
        let id = summary_id(&doc);
        let next = update_section_content(
            &doc,
            id,
            &json!({"type": "summary", "text": "With tag."}),
        )
        .unwrap();
        assert!(!next.section(id).unwrap().content.is_empty());
    }

    #[test]
    fn test_patch_with_wrong_type_tag_fails() {
        let doc = resume();
        let err =
            update_section_content(&doc, summary_id(&doc), &json!({"type": "experience"}))
                .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ContentTypeMismatch {
                expected: SectionType::Summary,
                ..
            }
        ));
    }

    #[test]
    fn test_patch_with_unknown_field_fails() {
        let doc = resume();
        let err = update_section_content(&doc, summary_id(&doc), &json!({"entries": []}))
            .unwrap_err();
        assert!(matches!(err, EngineError::ContentTypeMismatch { .. }));
    }

    #[test]
    fn test_non_object_patch_fails() {
        let doc = resume();
        let err = update_section_content(&doc, summary_id(&doc), &json!("not an object"))
            .unwrap_err();
        assert!(matches!(err, EngineError::ContentTypeMismatch { .. }));
    }

    #[test]
    fn test_patch_experience_entries() {
        let doc = resume();
        let id = experience_id(&doc);
        let next = update_section_content(
            &doc,
            id,
            &json!({"entries": [{
                "company": "Tech Corp",
                "position": "Senior Engineer",
                "start_date": "2020-01",
                "current": true,
                "bullets": ["Led migration of 12 services"]
            }]}),
        )
        .unwrap();

        let SectionContent::Experience { entries } = &next.section(id).unwrap().content else {
            panic!("content variant changed");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Tech Corp");
        assert!(!entries[0].id.is_nil(), "entry without id gets a fresh one");
    }

    #[test]
    fn test_patch_preserves_supplied_entry_ids() {
        let doc = resume();
        let id = experience_id(&doc);
        let entry_id = Uuid::new_v4();
        let next = update_section_content(
            &doc,
            id,
            &json!({"entries": [{"id": entry_id, "company": "Tech Corp", "position": "Engineer"}]}),
        )
        .unwrap();
        assert_eq!(next.section(id).unwrap().content.entry_ids(), vec![entry_id]);
    }

    #[test]
    fn test_patch_with_duplicate_entry_ids_fails() {
        let doc = resume();
        let id = experience_id(&doc);
        let entry_id = Uuid::new_v4();
        let err = update_section_content(
            &doc,
            id,
            &json!({"entries": [
                {"id": entry_id, "company": "Tech Corp", "position": "Engineer"},
                {"id": entry_id, "company": "Other Corp", "position": "Manager"}
            ]}),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::ContentTypeMismatch { .. }));
    }

    #[test]
    fn test_patch_missing_section_fails() {
        let doc = resume();
        assert!(matches!(
            update_section_content(&doc, Uuid::new_v4(), &json!({"text": "x"})).unwrap_err(),
            EngineError::SectionNotFound(_)
        ));
    }

    #[test]
    fn test_invalid_merged_content_fails_without_mutation() {
        let doc = resume();
        let before = doc.clone();
        let err = update_section_content(
            &doc,
            experience_id(&doc),
            &json!({"entries": [{"company": 42}]}),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::ContentTypeMismatch { .. }));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_contact_patch_merges_only_supplied_fields() {
        let mut doc = resume();
        doc.contact.full_name = "Jane Smith".to_string();
        doc.contact.phone = Some("+1-555-0123".to_string());

        let next = update_contact(
            &doc,
            &ContactPatch {
                email: Some("jane@example.com".to_string()),
                ..ContactPatch::default()
            },
        )
        .unwrap();
        assert_eq!(next.contact.full_name, "Jane Smith");
        assert_eq!(next.contact.email, "jane@example.com");
        assert_eq!(next.contact.phone.as_deref(), Some("+1-555-0123"));
    }

    #[test]
    fn test_contact_patch_empty_string_clears_optional_field() {
        let mut doc = resume();
        doc.contact.linkedin = Some("linkedin.com/in/jane".to_string());
        let next = update_contact(
            &doc,
            &ContactPatch {
                linkedin: Some(String::new()),
                ..ContactPatch::default()
            },
        )
        .unwrap();
        assert!(next.contact.linkedin.is_none());
    }

    #[test]
    fn test_contact_patch_accepts_malformed_email() {
        // Format problems are the validation engine's job, not a mutation
        // failure.
        let doc = resume();
        let next = update_contact(
            &doc,
            &ContactPatch {
                email: Some("not-an-email".to_string()),
                ..ContactPatch::default()
            },
        )
        .unwrap();
        assert_eq!(next.contact.email, "not-an-email");
    }
}
