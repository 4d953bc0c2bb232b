//! Document aggregate: contact info + ordered sections + design/metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::VariantConfig;
use crate::models::section::{Section, SectionContent, SectionType};

/// The document's overall kind, constraining allowed/required sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Resume,
    Cv,
    CoverLetter,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Resume => "resume",
            Variant::Cv => "cv",
            Variant::CoverLetter => "cover_letter",
        }
    }

    /// Static configuration for this variant (allowed/required/default
    /// sections, page budget).
    pub fn config(&self) -> &'static VariantConfig {
        VariantConfig::for_variant(*self)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact information block. Format checks live in the validation engine,
/// not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        DocumentMetadata {
            title: "My Resume".to_string(),
            industry: None,
            notes: None,
        }
    }
}

/// The document aggregate. Mutated exclusively through the mutation engine;
/// `design` is an opaque payload copied verbatim for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub variant: Variant,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default = "default_design")]
    pub design: Value,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_design() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Document {
    /// New document seeded with the variant's default sections.
    pub fn new(variant: Variant, title: impl Into<String>) -> Self {
        let now = Utc::now();
        let sections = variant
            .config()
            .default_sections
            .iter()
            .enumerate()
            .map(|(i, &ty)| Section::new(ty, i as u32))
            .collect();

        Document {
            id: Uuid::new_v4(),
            variant,
            contact: ContactInfo::default(),
            sections,
            design: default_design(),
            metadata: DocumentMetadata {
                title: title.into(),
                ..DocumentMetadata::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    pub fn section(&self, id: Uuid) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: Uuid) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// First section of the given type in render order, if any.
    pub fn first_section_of_type(&self, ty: SectionType) -> Option<&Section> {
        self.sections_in_order()
            .into_iter()
            .find(|s| s.section_type() == ty)
    }

    pub fn sections_of_type(&self, ty: SectionType) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|s| s.section_type() == ty)
            .collect()
    }

    /// Canonical render sequence: ascending `order`, ties broken by storage
    /// position (stable sort).
    pub fn sections_in_order(&self) -> Vec<&Section> {
        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        ordered.sort_by_key(|s| s.order);
        ordered
    }

    /// Renderer view: visible sections only, in render order.
    pub fn visible_sections_in_order(&self) -> Vec<&Section> {
        self.sections_in_order()
            .into_iter()
            .filter(|s| s.is_visible)
            .collect()
    }

    /// The next free `order` value for an appended section.
    pub fn next_order(&self) -> u32 {
        self.sections
            .iter()
            .map(|s| s.order)
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    /// Rough word count across contact, titles, and all section content.
    /// Feeds the page estimate in the validation engine.
    pub fn word_count(&self) -> usize {
        let mut count = words(&self.contact.full_name) + words(&self.contact.email);
        for section in &self.sections {
            count += words(section.display_title());
            count += content_words(&section.content);
        }
        count
    }
}

fn words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn content_words(content: &SectionContent) -> usize {
    match content {
        SectionContent::Summary { text } => words(text),
        SectionContent::Paragraph { heading, text } => {
            words(heading.as_deref().unwrap_or("")) + words(text)
        }
        SectionContent::Experience { entries } => entries
            .iter()
            .map(|e| {
                words(&e.company)
                    + words(&e.position)
                    + e.bullets.iter().map(|b| words(b)).sum::<usize>()
                    + e.achievements.iter().map(|a| words(a)).sum::<usize>()
            })
            .sum(),
        SectionContent::Education { entries } => entries
            .iter()
            .map(|e| {
                words(&e.institution)
                    + words(&e.degree)
                    + e.honors.iter().map(|h| words(h)).sum::<usize>()
            })
            .sum(),
        SectionContent::Skills { entries } => entries
            .iter()
            .map(|g| words(&g.category) + g.items.iter().map(|i| words(i)).sum::<usize>())
            .sum(),
        SectionContent::Projects { entries } => entries
            .iter()
            .map(|p| {
                words(&p.name)
                    + words(&p.description)
                    + p.highlights.iter().map(|h| words(h)).sum::<usize>()
            })
            .sum(),
        SectionContent::Publications { entries } => entries
            .iter()
            .map(|p| words(&p.title) + words(&p.venue))
            .sum(),
        SectionContent::Certifications { entries } => entries
            .iter()
            .map(|c| words(&c.name) + words(&c.issuer))
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_seeds_default_sections() {
        let doc = Document::new(Variant::Resume, "Test Resume");
        let types: Vec<SectionType> = doc
            .sections_in_order()
            .iter()
            .map(|s| s.section_type())
            .collect();
        assert_eq!(
            types,
            vec![
                SectionType::Summary,
                SectionType::Experience,
                SectionType::Education,
                SectionType::Skills,
            ]
        );
    }

    #[test]
    fn test_new_document_satisfies_required_sections() {
        for variant in [Variant::Resume, Variant::Cv, Variant::CoverLetter] {
            let doc = Document::new(variant, "Doc");
            for &required in variant.config().required_sections {
                assert!(
                    doc.first_section_of_type(required).is_some(),
                    "{variant} missing required {required}"
                );
            }
        }
    }

    #[test]
    fn test_sections_in_order_is_stable_on_ties() {
        let mut doc = Document::new(Variant::CoverLetter, "Letter");
        doc.sections = vec![
            Section::new(SectionType::Paragraph, 1),
            Section::new(SectionType::Paragraph, 1),
            Section::new(SectionType::Paragraph, 0),
        ];
        let ordered = doc.sections_in_order();
        assert_eq!(ordered[0].id, doc.sections[2].id);
        // Storage order breaks the tie between the two order=1 sections.
        assert_eq!(ordered[1].id, doc.sections[0].id);
        assert_eq!(ordered[2].id, doc.sections[1].id);
    }

    #[test]
    fn test_visible_sections_filters_hidden() {
        let mut doc = Document::new(Variant::Resume, "Doc");
        let hidden = doc.sections[0].id;
        doc.section_mut(hidden).unwrap().is_visible = false;
        assert!(doc
            .visible_sections_in_order()
            .iter()
            .all(|s| s.id != hidden));
    }

    #[test]
    fn test_next_order_empty_and_gapped() {
        let mut doc = Document::new(Variant::Resume, "Doc");
        doc.sections.clear();
        assert_eq!(doc.next_order(), 0);
        doc.sections.push(Section::new(SectionType::Summary, 7));
        assert_eq!(doc.next_order(), 8);
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let mut doc = Document::new(Variant::Cv, "Research CV");
        doc.contact.full_name = "Jane Smith".to_string();
        doc.contact.email = "jane@example.com".to_string();
        doc.design = serde_json::json!({"font": "Inter", "size_pt": 11});

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_design_payload_copied_verbatim() {
        let mut doc = Document::new(Variant::Resume, "Doc");
        let design = serde_json::json!({"color": "#202031", "layout": {"columns": 1}});
        doc.design = design.clone();
        let back: Document =
            serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(back.design, design);
    }
}
