//! Rule implementations. Each rule appends zero or more warnings and never
//! looks at what other rules produced.

use crate::config::ValidationConfig;
use crate::models::document::Document;
use crate::models::section::SectionContent;

use super::{Severity, ValidationRule, ValidationWarning};

/// Missing name or email is an error: a document without contact details is
/// unusable regardless of content quality.
pub fn contact_completeness(doc: &Document, out: &mut Vec<ValidationWarning>) {
    let mut missing = Vec::new();
    if doc.contact.full_name.trim().is_empty() {
        missing.push("name");
    }
    if doc.contact.email.trim().is_empty() {
        missing.push("email");
    }
    if !missing.is_empty() {
        out.push(ValidationWarning {
            rule: ValidationRule::ContactIncomplete,
            severity: Severity::Error,
            section_id: None,
            message: format!("Missing contact information: {}", missing.join(", ")),
            auto_fixable: false,
        });
    }
}

/// Loose shape check: something@something.tld. Anything stricter belongs to
/// the external analyzer.
pub fn contact_email_format(doc: &Document, out: &mut Vec<ValidationWarning>) {
    let email = doc.contact.email.trim();
    if email.is_empty() {
        return; // completeness rule already covers this
    }
    if !looks_like_email(email) {
        out.push(ValidationWarning {
            rule: ValidationRule::ContactEmailFormat,
            severity: Severity::Warning,
            section_id: None,
            message: format!("'{email}' does not look like a valid email address"),
            auto_fixable: false,
        });
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// A required-type section with no entries/text reads as an unfinished
/// document.
pub fn empty_required_sections(doc: &Document, out: &mut Vec<ValidationWarning>) {
    for section in doc.sections_in_order() {
        if doc.variant.config().requires(section.section_type()) && section.content.is_empty() {
            out.push(ValidationWarning {
                rule: ValidationRule::EmptyRequiredSection,
                severity: Severity::Warning,
                section_id: Some(section.id),
                message: format!(
                    "Required section '{}' has no content",
                    section.display_title()
                ),
                auto_fixable: false,
            });
        }
    }
}

pub fn summary_length(
    doc: &Document,
    config: &ValidationConfig,
    out: &mut Vec<ValidationWarning>,
) {
    for section in doc.sections_in_order() {
        let SectionContent::Summary { text } = &section.content else {
            continue;
        };
        let len = text.trim().chars().count();
        if len == 0 {
            continue; // emptiness is its own rule when summary is required
        }
        if len < config.summary_min_chars {
            out.push(ValidationWarning {
                rule: ValidationRule::SummaryLength,
                severity: Severity::Warning,
                section_id: Some(section.id),
                message: format!(
                    "Summary is {len} characters; aim for at least {}",
                    config.summary_min_chars
                ),
                auto_fixable: false,
            });
        } else if len > config.summary_max_chars {
            out.push(ValidationWarning {
                rule: ValidationRule::SummaryLength,
                severity: Severity::Info,
                section_id: Some(section.id),
                message: format!(
                    "Summary is {len} characters; consider trimming below {}",
                    config.summary_max_chars
                ),
                auto_fixable: false,
            });
        }
    }
}

/// Page estimate: ceil(words / words_per_page), minimum one page.
pub fn page_overflow(doc: &Document, config: &ValidationConfig, out: &mut Vec<ValidationWarning>) {
    let max_pages = doc.variant.config().max_pages;
    let pages = estimate_pages(doc.word_count(), config.words_per_page);
    if pages > max_pages {
        out.push(ValidationWarning {
            rule: ValidationRule::PageOverflow,
            severity: Severity::Warning,
            section_id: None,
            message: format!(
                "Estimated {pages} pages exceeds the {max_pages}-page limit for a {}",
                doc.variant
            ),
            auto_fixable: false,
        });
    }
}

pub fn estimate_pages(word_count: usize, words_per_page: usize) -> u32 {
    let per_page = words_per_page.max(1);
    (word_count.div_ceil(per_page)).max(1) as u32
}

/// Experience bullets with no digit, %, $, or multiplier read as vague.
pub fn unquantified_bullets(doc: &Document, out: &mut Vec<ValidationWarning>) {
    for section in doc.sections_in_order() {
        let SectionContent::Experience { entries } = &section.content else {
            continue;
        };
        let vague: usize = entries
            .iter()
            .flat_map(|e| e.bullets.iter())
            .filter(|b| !b.trim().is_empty() && !is_quantified(b))
            .count();
        if vague > 0 {
            out.push(ValidationWarning {
                rule: ValidationRule::UnquantifiedBullets,
                severity: Severity::Info,
                section_id: Some(section.id),
                message: format!(
                    "{vague} experience bullet(s) carry no metric: add a number, %, or $ amount"
                ),
                auto_fixable: false,
            });
        }
    }
}

fn is_quantified(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£')
        || lower.contains("x faster")
        || lower.contains("x improvement")
}

/// All copies of a required type hidden: technically present, invisible in
/// the render.
pub fn hidden_required_sections(doc: &Document, out: &mut Vec<ValidationWarning>) {
    for &required in doc.variant.config().required_sections {
        let sections = doc.sections_of_type(required);
        if !sections.is_empty() && sections.iter().all(|s| !s.is_visible) {
            out.push(ValidationWarning {
                rule: ValidationRule::HiddenRequiredSection,
                severity: Severity::Info,
                section_id: sections.first().map(|s| s.id),
                message: format!("Required section '{required}' is hidden from the preview"),
                auto_fixable: false,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Variant;
    use crate::models::section::{ExperienceEntry, SectionType};
    use crate::validation::validate;
    use serde_json::json;
    use uuid::Uuid;

    fn resume_with_contact() -> Document {
        let mut doc = Document::new(Variant::Resume, "Doc");
        doc.contact.full_name = "Jane Smith".to_string();
        doc.contact.email = "jane@example.com".to_string();
        doc
    }

    fn rules_fired(doc: &Document) -> Vec<ValidationRule> {
        validate(doc).into_iter().map(|w| w.rule).collect()
    }

    #[test]
    fn test_missing_contact_is_error() {
        let doc = Document::new(Variant::Resume, "Doc");
        let warnings = validate(&doc);
        let contact = warnings
            .iter()
            .find(|w| w.rule == ValidationRule::ContactIncomplete)
            .unwrap();
        assert_eq!(contact.severity, Severity::Error);
        assert!(contact.message.contains("name"));
        assert!(contact.message.contains("email"));
    }

    #[test]
    fn test_complete_contact_passes() {
        let doc = resume_with_contact();
        assert!(!rules_fired(&doc).contains(&ValidationRule::ContactIncomplete));
    }

    #[test]
    fn test_malformed_email_is_warning() {
        let mut doc = resume_with_contact();
        doc.contact.email = "jane-at-example".to_string();
        let warnings = validate(&doc);
        let email = warnings
            .iter()
            .find(|w| w.rule == ValidationRule::ContactEmailFormat)
            .unwrap();
        assert_eq!(email.severity, Severity::Warning);
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@sub.domain.io"));
        assert!(!looks_like_email("no-at-sign.com"));
        assert!(!looks_like_email("x@nodot"));
        assert!(!looks_like_email("x@.com"));
        assert!(!looks_like_email("a b@c.io"));
    }

    #[test]
    fn test_empty_required_section_warns() {
        let doc = resume_with_contact();
        let warnings = validate(&doc);
        let empty = warnings
            .iter()
            .find(|w| w.rule == ValidationRule::EmptyRequiredSection)
            .unwrap();
        assert_eq!(empty.severity, Severity::Warning);
        assert!(!empty.auto_fixable);
        let exp_id = doc
            .first_section_of_type(SectionType::Experience)
            .unwrap()
            .id;
        assert_eq!(empty.section_id, Some(exp_id));
    }

    #[test]
    fn test_short_summary_warns_long_summary_informs() {
        let mut doc = resume_with_contact();
        let summary_id = doc.first_section_of_type(SectionType::Summary).unwrap().id;
        doc = crate::mutation::update_section_content(
            &doc,
            summary_id,
            &json!({"text": "Too short."}),
        )
        .unwrap();
        let short = validate(&doc);
        assert!(short
            .iter()
            .any(|w| w.rule == ValidationRule::SummaryLength
                && w.severity == Severity::Warning));

        let long_text = "word ".repeat(200);
        doc = crate::mutation::update_section_content(&doc, summary_id, &json!({"text": long_text}))
            .unwrap();
        let long = validate(&doc);
        assert!(long
            .iter()
            .any(|w| w.rule == ValidationRule::SummaryLength && w.severity == Severity::Info));
    }

    #[test]
    fn test_summary_in_band_passes() {
        let mut doc = resume_with_contact();
        let summary_id = doc.first_section_of_type(SectionType::Summary).unwrap().id;
        doc = crate::mutation::update_section_content(
            &doc,
            summary_id,
            &json!({"text": "Experienced software engineer with eight years building and operating distributed systems."}),
        )
        .unwrap();
        assert!(!rules_fired(&doc).contains(&ValidationRule::SummaryLength));
    }

    #[test]
    fn test_page_overflow_for_resume() {
        let mut doc = resume_with_contact();
        let exp_id = doc
            .first_section_of_type(SectionType::Experience)
            .unwrap()
            .id;
        // ~1,200 words of bullets: past the 2-page resume estimate.
        let bullet = "Shipped a measurable improvement to production systems".to_string();
        let entries: Vec<ExperienceEntry> = (0..20)
            .map(|i| ExperienceEntry {
                id: Uuid::new_v4(),
                company: format!("Company {i}"),
                position: "Engineer".to_string(),
                location: None,
                start_date: None,
                end_date: None,
                current: false,
                bullets: vec![bullet.clone(); 8],
                achievements: vec![],
            })
            .collect();
        doc = crate::mutation::update_section_content(
            &doc,
            exp_id,
            &json!({"entries": entries}),
        )
        .unwrap();

        assert!(rules_fired(&doc).contains(&ValidationRule::PageOverflow));
    }

    #[test]
    fn test_page_estimate_rounding() {
        assert_eq!(estimate_pages(0, 450), 1);
        assert_eq!(estimate_pages(450, 450), 1);
        assert_eq!(estimate_pages(451, 450), 2);
        assert_eq!(estimate_pages(1350, 450), 3);
    }

    #[test]
    fn test_unquantified_bullets_counted() {
        let mut doc = resume_with_contact();
        let exp_id = doc
            .first_section_of_type(SectionType::Experience)
            .unwrap()
            .id;
        doc = crate::mutation::update_section_content(
            &doc,
            exp_id,
            &json!({"entries": [{
                "company": "Tech Corp",
                "position": "Engineer",
                "bullets": [
                    "Reduced latency by 40%",
                    "Improved the user experience",
                    "Saved $50,000 annually",
                    "Helped the team deliver"
                ]
            }]}),
        )
        .unwrap();

        let warnings = validate(&doc);
        let vague = warnings
            .iter()
            .find(|w| w.rule == ValidationRule::UnquantifiedBullets)
            .unwrap();
        assert_eq!(vague.severity, Severity::Info);
        assert!(vague.message.starts_with("2 "));
    }

    #[test]
    fn test_hidden_required_section_informs() {
        let mut doc = resume_with_contact();
        let exp_id = doc
            .first_section_of_type(SectionType::Experience)
            .unwrap()
            .id;
        doc = crate::mutation::toggle_section_visibility(&doc, exp_id).unwrap();
        let warnings = validate(&doc);
        assert!(warnings
            .iter()
            .any(|w| w.rule == ValidationRule::HiddenRequiredSection
                && w.section_id == Some(exp_id)));
    }
}
