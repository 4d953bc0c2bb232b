//! Structural section operations: add, remove, reorder, duplicate, toggle.
//!
//! Every operation is a pure function over the document value: it either
//! returns a new valid document or fails without touching the input. History
//! is the caller's concern (see `session`).

use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};
use crate::models::document::Document;
use crate::models::section::{Section, SectionType};

/// Appends a new empty section of the given type.
///
/// Fails with `InvalidSectionType` when the variant disallows the type, and
/// with `DuplicateSingleton` when a non-repeatable section of that type is
/// already present. The new section lands at the end of the render sequence.
pub fn add_section(doc: &Document, section_type: SectionType) -> EngineResult<Document> {
    let config = doc.variant.config();
    if !config.allows(section_type) {
        return Err(EngineError::InvalidSectionType {
            variant: doc.variant,
            section_type,
        });
    }
    if !section_type.is_repeatable() && !doc.sections_of_type(section_type).is_empty() {
        return Err(EngineError::DuplicateSingleton(section_type));
    }

    let mut next = doc.clone();
    next.sections
        .push(Section::new(section_type, doc.next_order()));
    Ok(next)
}

/// Removes the section with the given id.
///
/// Fails with `RequiredSectionViolation` when it is the last section of a
/// type the variant requires. Remaining `order` values are not renumbered;
/// gaps are fine since only relative order matters.
pub fn remove_section(doc: &Document, id: Uuid) -> EngineResult<Document> {
    let section = doc.section(id).ok_or(EngineError::SectionNotFound(id))?;
    let section_type = section.section_type();

    if doc.variant.config().requires(section_type)
        && doc.sections_of_type(section_type).len() == 1
    {
        return Err(EngineError::RequiredSectionViolation(section_type));
    }

    let mut next = doc.clone();
    next.sections.retain(|s| s.id != id);
    Ok(next)
}

/// Moves the section at `from` to `to` within the rendered (order-sorted)
/// sequence, then renumbers every order densely 0..N-1 to stop drift.
///
/// `from == to` returns the document unchanged; out-of-bounds indices fail
/// with `IndexOutOfRange` rather than clamping.
pub fn reorder_sections(doc: &Document, from: usize, to: usize) -> EngineResult<Document> {
    let len = doc.sections.len();
    for index in [from, to] {
        if index >= len {
            return Err(EngineError::IndexOutOfRange { index, len });
        }
    }
    if from == to {
        return Ok(doc.clone());
    }

    let mut sequence: Vec<Uuid> = doc.sections_in_order().iter().map(|s| s.id).collect();
    let moved = sequence.remove(from);
    sequence.insert(to, moved);

    let mut next = doc.clone();
    for (position, id) in sequence.iter().enumerate() {
        if let Some(section) = next.section_mut(*id) {
            section.order = position as u32;
        }
    }
    Ok(next)
}

/// Duplicates a repeatable section, inserting the copy immediately after the
/// source in the render sequence and renumbering every order densely, as
/// `reorder_sections` does. Renumbering from the rendered sequence keeps the
/// copy adjacent to its source even when stale order ties exist.
///
/// The clone keeps every field value but gets a new section id and fresh
/// entry ids. Fails with `NotRepeatable` for singleton types.
pub fn duplicate_section(doc: &Document, id: Uuid) -> EngineResult<Document> {
    let source = doc.section(id).ok_or(EngineError::SectionNotFound(id))?;
    let section_type = source.section_type();
    if !section_type.is_repeatable() {
        return Err(EngineError::NotRepeatable(section_type));
    }

    let mut sequence: Vec<Uuid> = doc.sections_in_order().iter().map(|s| s.id).collect();
    let source_position = sequence
        .iter()
        .position(|candidate| *candidate == id)
        .ok_or(EngineError::SectionNotFound(id))?;

    let copy = Section {
        id: Uuid::new_v4(),
        order: source_position as u32 + 1,
        is_visible: source.is_visible,
        title: source.title.clone(),
        content: source.content.with_fresh_entry_ids(),
    };
    sequence.insert(source_position + 1, copy.id);

    let mut next = doc.clone();
    next.sections.push(copy);
    for (position, section_id) in sequence.iter().enumerate() {
        if let Some(section) = next.section_mut(*section_id) {
            section.order = position as u32;
        }
    }
    Ok(next)
}

/// Flips a section's visibility. Hidden sections stay in the document and in
/// the undo history; only the renderer view skips them.
pub fn toggle_section_visibility(doc: &Document, id: Uuid) -> EngineResult<Document> {
    let mut next = doc.clone();
    match next.section_mut(id) {
        Some(section) => {
            section.is_visible = !section.is_visible;
            Ok(next)
        }
        None => Err(EngineError::SectionNotFound(id)),
    }
}
