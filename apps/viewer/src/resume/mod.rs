//! The reference section store: the in-memory resume behind the HTTP API.

pub mod extract;
pub mod handlers;
pub mod search;
pub mod sections;

use crate::resume::sections::{parse_sections, Sections};

/// The currently uploaded resume. One per store process.
#[derive(Debug, Clone, Default)]
pub struct ResumeData {
    pub full_text: String,
    pub sections: Sections,
    pub current_file: Option<String>,
}

impl ResumeData {
    /// Replaces the document with freshly extracted text.
    pub fn ingest(&mut self, file_name: &str, text: String) {
        self.sections = parse_sections(&text);
        self.full_text = text;
        self.current_file = Some(file_name.to_string());
    }

    /// Replaces the whole text and re-derives its sections.
    pub fn replace_full_text(&mut self, text: String) {
        self.sections = parse_sections(&text);
        self.full_text = text;
    }

    /// Replaces one section and rebuilds the full text from all sections.
    /// Returns `false` if `name` is not a section.
    pub fn replace_section(&mut self, name: &str, content: String) -> bool {
        let Some(slot) = self.sections.get_mut(name) else {
            return false;
        };
        *slot = content;
        self.full_text = self.sections.to_full_text();
        true
    }
}
