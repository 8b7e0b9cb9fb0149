use std::fmt;

use crate::protocol::{ALL_SECTIONS, FULL_RESUME, SECTION_NAMES};

/// Identifier of an addressable section, or the whole-document sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn all() -> Self {
        Self(ALL_SECTIONS.to_string())
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_SECTIONS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id an edit of this section is written back under.
    pub fn save_target(&self) -> &str {
        if self.is_all() {
            FULL_RESUME
        } else {
            &self.0
        }
    }
}

impl Default for SectionId {
    fn default() -> Self {
        SectionId::all()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub id: SectionId,
    pub active: bool,
}

/// The selectable section listing. At most one entry is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    entries: Vec<SectionEntry>,
}

impl Default for SectionList {
    fn default() -> Self {
        let entries = std::iter::once(SectionId::all())
            .chain(SECTION_NAMES.iter().map(|name| SectionId::new(*name)))
            .map(|id| SectionEntry { id, active: false })
            .collect();
        Self { entries }
    }
}

impl SectionList {
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Looks up a listed id. Matching is case-insensitive so `skills` finds
    /// `Skills`; the listed spelling is returned.
    pub fn find(&self, id: &str) -> Option<&SectionId> {
        self.entries
            .iter()
            .map(|e| &e.id)
            .find(|known| known.as_str().eq_ignore_ascii_case(id))
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// Marks `id` active and clears every other entry.
    pub fn activate(&mut self, id: &SectionId) {
        for entry in &mut self.entries {
            entry.active = &entry.id == id;
        }
    }

    pub fn active(&self) -> Option<&SectionId> {
        self.entries.iter().find(|e| e.active).map(|e| &e.id)
    }
}
