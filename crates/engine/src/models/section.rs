//! Section content model: the tagged-variant shapes a document is built from.
//!
//! Every section type owns its own content shape, discriminated by the
//! serialized `type` tag. Matches over `SectionContent` are exhaustive on
//! purpose: adding a section type must fail to compile until every consumer
//! handles it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kinds of sections a document can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Publications,
    Certifications,
    Paragraph,
}

impl SectionType {
    pub const ALL: &'static [SectionType] = &[
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Projects,
        SectionType::Publications,
        SectionType::Certifications,
        SectionType::Paragraph,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
            SectionType::Publications => "publications",
            SectionType::Certifications => "certifications",
            SectionType::Paragraph => "paragraph",
        }
    }

    /// Whether a document may hold more than one section of this type.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, SectionType::Paragraph)
    }

    /// Default display title for a freshly added section.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionType::Summary => "Professional Summary",
            SectionType::Experience => "Experience",
            SectionType::Education => "Education",
            SectionType::Skills => "Skills",
            SectionType::Projects => "Projects",
            SectionType::Publications => "Publications",
            SectionType::Certifications => "Certifications",
            SectionType::Paragraph => "Paragraph",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single work experience entry. Dates use "YYYY-MM" or "Present".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub honors: Vec<String>,
}

/// Categorized skills, e.g. "Programming Languages" -> ["Rust", "Python"].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
}

/// Content payload of a section, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionContent {
    Summary {
        #[serde(default)]
        text: String,
    },
    Experience {
        #[serde(default)]
        entries: Vec<ExperienceEntry>,
    },
    Education {
        #[serde(default)]
        entries: Vec<EducationEntry>,
    },
    Skills {
        #[serde(default)]
        entries: Vec<SkillGroup>,
    },
    Projects {
        #[serde(default)]
        entries: Vec<ProjectEntry>,
    },
    Publications {
        #[serde(default)]
        entries: Vec<PublicationEntry>,
    },
    Certifications {
        #[serde(default)]
        entries: Vec<CertificationEntry>,
    },
    Paragraph {
        #[serde(default)]
        heading: Option<String>,
        #[serde(default)]
        text: String,
    },
}

impl SectionContent {
    /// Empty content shaped for the given type.
    pub fn empty(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Summary => SectionContent::Summary {
                text: String::new(),
            },
            SectionType::Experience => SectionContent::Experience { entries: vec![] },
            SectionType::Education => SectionContent::Education { entries: vec![] },
            SectionType::Skills => SectionContent::Skills { entries: vec![] },
            SectionType::Projects => SectionContent::Projects { entries: vec![] },
            SectionType::Publications => SectionContent::Publications { entries: vec![] },
            SectionType::Certifications => SectionContent::Certifications { entries: vec![] },
            SectionType::Paragraph => SectionContent::Paragraph {
                heading: None,
                text: String::new(),
            },
        }
    }

    pub fn section_type(&self) -> SectionType {
        match self {
            SectionContent::Summary { .. } => SectionType::Summary,
            SectionContent::Experience { .. } => SectionType::Experience,
            SectionContent::Education { .. } => SectionType::Education,
            SectionContent::Skills { .. } => SectionType::Skills,
            SectionContent::Projects { .. } => SectionType::Projects,
            SectionContent::Publications { .. } => SectionType::Publications,
            SectionContent::Certifications { .. } => SectionType::Certifications,
            SectionContent::Paragraph { .. } => SectionType::Paragraph,
        }
    }

    /// True when the section holds no user-entered content.
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Summary { text } => text.trim().is_empty(),
            SectionContent::Experience { entries } => entries.is_empty(),
            SectionContent::Education { entries } => entries.is_empty(),
            SectionContent::Skills { entries } => entries.is_empty(),
            SectionContent::Projects { entries } => entries.is_empty(),
            SectionContent::Publications { entries } => entries.is_empty(),
            SectionContent::Certifications { entries } => entries.is_empty(),
            SectionContent::Paragraph { heading, text } => {
                text.trim().is_empty() && heading.as_deref().unwrap_or("").trim().is_empty()
            }
        }
    }

    /// Field names of this content shape, excluding the `type` tag.
    /// Used to reject patches that target a different shape.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            SectionContent::Summary { .. } => &["text"],
            SectionContent::Experience { .. }
            | SectionContent::Education { .. }
            | SectionContent::Skills { .. }
            | SectionContent::Projects { .. }
            | SectionContent::Publications { .. }
            | SectionContent::Certifications { .. } => &["entries"],
            SectionContent::Paragraph { .. } => &["heading", "text"],
        }
    }

    /// Entry ids contained in this content, in storage order.
    pub fn entry_ids(&self) -> Vec<Uuid> {
        match self {
            SectionContent::Summary { .. } | SectionContent::Paragraph { .. } => vec![],
            SectionContent::Experience { entries } => entries.iter().map(|e| e.id).collect(),
            SectionContent::Education { entries } => entries.iter().map(|e| e.id).collect(),
            SectionContent::Skills { entries } => entries.iter().map(|e| e.id).collect(),
            SectionContent::Projects { entries } => entries.iter().map(|e| e.id).collect(),
            SectionContent::Publications { entries } => entries.iter().map(|e| e.id).collect(),
            SectionContent::Certifications { entries } => entries.iter().map(|e| e.id).collect(),
        }
    }

    /// Regenerates every entry id, preserving all other field values.
    /// Used when duplicating a section so the clone gets fresh identities.
    pub fn with_fresh_entry_ids(&self) -> Self {
        let mut content = self.clone();
        match &mut content {
            SectionContent::Summary { .. } | SectionContent::Paragraph { .. } => {}
            SectionContent::Experience { entries } => {
                entries.iter_mut().for_each(|e| e.id = Uuid::new_v4())
            }
            SectionContent::Education { entries } => {
                entries.iter_mut().for_each(|e| e.id = Uuid::new_v4())
            }
            SectionContent::Skills { entries } => {
                entries.iter_mut().for_each(|e| e.id = Uuid::new_v4())
            }
            SectionContent::Projects { entries } => {
                entries.iter_mut().for_each(|e| e.id = Uuid::new_v4())
            }
            SectionContent::Publications { entries } => {
                entries.iter_mut().for_each(|e| e.id = Uuid::new_v4())
            }
            SectionContent::Certifications { entries } => {
                entries.iter_mut().for_each(|e| e.id = Uuid::new_v4())
            }
        }
        content
    }
}

/// A titled, orderable, independently-typed block of document content.
///
/// `order` defines the render sequence (ascending, stable); values need not
/// be contiguous. The section type is derived from the content variant, so a
/// type/content mismatch is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub order: u32,
    pub is_visible: bool,
    #[serde(default)]
    pub title: Option<String>,
    pub content: SectionContent,
}

impl Section {
    /// New empty section of the given type at the given order slot.
    pub fn new(section_type: SectionType, order: u32) -> Self {
        Section {
            id: Uuid::new_v4(),
            order,
            is_visible: true,
            title: None,
            content: SectionContent::empty(section_type),
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.content.section_type()
    }

    /// Display title: the override if set, otherwise the type default.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.section_type().default_title())
    }
}
