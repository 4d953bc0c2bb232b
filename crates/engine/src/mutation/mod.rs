// Mutation engine: pure document transforms.
// Each operation either returns a new valid document or fails with a
// recoverable error and no side effects. Checkpointing lives in `session`.

pub mod content;
pub mod sections;
pub mod variant;

pub use content::{update_contact, update_section_content, ContactPatch};
pub use sections::{
    add_section, duplicate_section, remove_section, reorder_sections, toggle_section_visibility,
};
pub use variant::{switch_variant, VariantSwitch};
