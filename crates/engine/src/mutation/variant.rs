//! Variant switching: re-validates the section list against the new
//! variant's policy, dropping what is no longer allowed (reported, never
//! silent) and auto-inserting missing required sections.

use uuid::Uuid;

use crate::errors::EngineResult;
use crate::models::document::{Document, Variant};
use crate::models::section::Section;

/// Outcome of a `switch_variant` call. `removed_section_ids` lists every
/// section the switch dropped, so the caller can surface the loss.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSwitch {
    pub document: Document,
    pub removed_section_ids: Vec<Uuid>,
}

/// Switches the document to `new_variant`.
///
/// Sections whose type the new variant disallows are removed and their ids
/// reported back. Required sections the document now lacks are appended
/// empty, so the result always satisfies the new variant's required-section
/// invariant. Switching to the current variant is a no-op.
pub fn switch_variant(doc: &Document, new_variant: Variant) -> EngineResult<VariantSwitch> {
    if new_variant == doc.variant {
        return Ok(VariantSwitch {
            document: doc.clone(),
            removed_section_ids: vec![],
        });
    }

    let config = new_variant.config();
    let mut next = doc.clone();
    next.variant = new_variant;

    let removed_section_ids: Vec<Uuid> = next
        .sections
        .iter()
        .filter(|s| !config.allows(s.section_type()))
        .map(|s| s.id)
        .collect();
    next.sections.retain(|s| config.allows(s.section_type()));

    for &required in config.required_sections {
        if next.sections_of_type(required).is_empty() {
            let order = next.next_order();
            next.sections.push(Section::new(required, order));
        }
    }

    Ok(VariantSwitch {
        document: next,
        removed_section_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionType;

    #[test]
    fn test_switch_resume_to_cover_letter_drops_and_inserts() {
        let doc = Document::new(Variant::Resume, "Resume");
        let resume_ids: Vec<Uuid> = doc.sections.iter().map(|s| s.id).collect();

        let switch = switch_variant(&doc, Variant::CoverLetter).unwrap();
        // Nothing a resume holds is allowed in a cover letter.
        assert_eq!(switch.removed_section_ids, resume_ids);

        let letter = &switch.document;
        assert_eq!(letter.variant, Variant::CoverLetter);
        assert_eq!(letter.sections.len(), 1);
        assert_eq!(
            letter.sections[0].section_type(),
            SectionType::Paragraph,
            "required paragraph auto-inserted"
        );
    }

    #[test]
    fn test_switch_resume_to_cv_keeps_sections() {
        let doc = Document::new(Variant::Resume, "Resume");
        let switch = switch_variant(&doc, Variant::Cv).unwrap();
        assert!(switch.removed_section_ids.is_empty());
        // CV additionally requires education, which the resume defaults
        // already include; no insertion needed.
        assert_eq!(switch.document.sections.len(), doc.sections.len());
    }

    #[test]
    fn test_switch_inserts_missing_required_sections() {
        let mut doc = Document::new(Variant::Resume, "Resume");
        let education = doc
            .first_section_of_type(SectionType::Education)
            .unwrap()
            .id;
        doc.sections.retain(|s| s.id != education);

        let switch = switch_variant(&doc, Variant::Cv).unwrap();
        let inserted = switch
            .document
            .first_section_of_type(SectionType::Education)
            .unwrap();
        assert!(inserted.content.is_empty());
        assert_eq!(inserted.order, switch.document.next_order() - 1);
    }

    #[test]
    fn test_switch_to_same_variant_is_noop() {
        let doc = Document::new(Variant::Cv, "CV");
        let switch = switch_variant(&doc, Variant::Cv).unwrap();
        assert_eq!(switch.document, doc);
        assert!(switch.removed_section_ids.is_empty());
    }

    #[test]
    fn test_switch_result_satisfies_new_invariant() {
        for from in [Variant::Resume, Variant::Cv, Variant::CoverLetter] {
            for to in [Variant::Resume, Variant::Cv, Variant::CoverLetter] {
                let doc = Document::new(from, "Doc");
                let switch = switch_variant(&doc, to).unwrap();
                for &required in to.config().required_sections {
                    assert!(
                        switch
                            .document
                            .first_section_of_type(required)
                            .is_some(),
                        "{from} -> {to}: missing required {required}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_switch_never_drops_silently() {
        let doc = Document::new(Variant::Cv, "CV");
        let before: Vec<Uuid> = doc.sections.iter().map(|s| s.id).collect();
        let switch = switch_variant(&doc, Variant::CoverLetter).unwrap();
        for id in before {
            let kept = switch.document.section(id).is_some();
            let reported = switch.removed_section_ids.contains(&id);
            assert!(kept || reported, "section {id} lost without notice");
        }
    }
}
