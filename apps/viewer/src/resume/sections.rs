use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::protocol::SECTION_NAMES;

const FALLBACK_SECTION: &str = "Other";

/// Lines at least this long are body text, never headers.
const MAX_HEADER_LEN: usize = 50;

/// Header keywords per section, checked in order; the first hit wins.
const HEADER_PATTERNS: &[(&str, &str)] = &[
    ("Education", "education|academic|qualification"),
    ("Experience", "experience|work|employment|professional"),
    ("Projects", "projects|portfolio"),
    ("Skills", "skills|technical skills|competencies|expertise"),
];

fn header_matchers() -> &'static [(&'static str, Regex)] {
    static MATCHERS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        HEADER_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                let re = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("header patterns are valid");
                (*name, re)
            })
            .collect()
    })
}

/// Section text keyed by name, always holding every name in
/// [`SECTION_NAMES`] in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(&'static str, String)>,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            entries: SECTION_NAMES.iter().map(|n| (*n, String::new())).collect(),
        }
    }
}

impl Sections {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, content)| content.as_str())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut String> {
        self.entries
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, content)| content)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, c)| (*n, c.as_str()))
    }

    /// Rebuilds a full document: each non-blank section under an upper-cased
    /// header line.
    pub fn to_full_text(&self) -> String {
        let mut text = String::new();
        for (name, content) in self.iter() {
            if content.trim().is_empty() {
                continue;
            }
            text.push('\n');
            text.push_str(&name.to_uppercase());
            text.push('\n');
            text.push_str(content);
            text.push('\n');
        }
        text
    }
}

/// Section a line opens, if it looks like a header.
fn header_section(line: &str) -> Option<&'static str> {
    if line.chars().count() >= MAX_HEADER_LEN {
        return None;
    }
    header_matchers()
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(name, _)| *name)
}

/// Splits resume text into sections by header lines.
///
/// Blank lines are dropped and header lines are not copied into content.
pub fn parse_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current = FALLBACK_SECTION;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(section) = header_section(line) {
            current = section;
            continue;
        }
        if let Some(content) = sections.get_mut(current) {
            content.push_str(line);
            content.push('\n');
        }
    }

    sections
}
