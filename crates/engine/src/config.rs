//! Static per-variant configuration and validation tunables.

use serde::{Deserialize, Serialize};

use crate::models::document::Variant;
use crate::models::section::SectionType;

/// Section policy for one document variant. Consulted by the mutation engine
/// (gating add/remove/switch) and the validation engine (page budget,
/// required-content warnings).
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfig {
    pub required_sections: &'static [SectionType],
    pub allowed_sections: &'static [SectionType],
    pub default_sections: &'static [SectionType],
    pub max_pages: u32,
}

const RESUME_CONFIG: VariantConfig = VariantConfig {
    required_sections: &[SectionType::Experience],
    allowed_sections: &[
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
        SectionType::Projects,
        SectionType::Publications,
        SectionType::Certifications,
    ],
    default_sections: &[
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
    ],
    max_pages: 2,
};

const CV_CONFIG: VariantConfig = VariantConfig {
    required_sections: &[SectionType::Experience, SectionType::Education],
    allowed_sections: SectionType::ALL,
    default_sections: &[
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Publications,
    ],
    max_pages: 10,
};

const COVER_LETTER_CONFIG: VariantConfig = VariantConfig {
    required_sections: &[SectionType::Paragraph],
    allowed_sections: &[SectionType::Paragraph],
    default_sections: &[SectionType::Paragraph],
    max_pages: 1,
};

impl VariantConfig {
    pub fn for_variant(variant: Variant) -> &'static VariantConfig {
        match variant {
            Variant::Resume => &RESUME_CONFIG,
            Variant::Cv => &CV_CONFIG,
            Variant::CoverLetter => &COVER_LETTER_CONFIG,
        }
    }

    pub fn allows(&self, section_type: SectionType) -> bool {
        self.allowed_sections.contains(&section_type)
    }

    pub fn requires(&self, section_type: SectionType) -> bool {
        self.required_sections.contains(&section_type)
    }
}

/// Tunables for the validation engine. Callers may deserialize these from
/// their own configuration; defaults match the original builder's bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Lower bound of the summary character band.
    pub summary_min_chars: usize,
    /// Upper bound of the summary character band.
    pub summary_max_chars: usize,
    /// Divisor for the page-count estimate (words per rendered page).
    pub words_per_page: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            summary_min_chars: 50,
            summary_max_chars: 500,
            words_per_page: 450,
        }
    }
}
