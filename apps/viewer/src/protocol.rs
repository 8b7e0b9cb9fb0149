//! Wire shapes shared by the section store server and the viewer client.
//!
//! Every reply carries a `status` discriminator. Anything other than
//! [`STATUS_SUCCESS`] is a rejection and carries a human-readable `message`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Section id meaning "the entire document".
pub const ALL_SECTIONS: &str = "all";

/// Update target used when the whole document is being replaced.
pub const FULL_RESUME: &str = "full_resume";

/// Multipart field name the upload endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "file";

/// Sections a resume is parsed into, in document order. `Other` collects
/// everything before the first recognised header.
pub const SECTION_NAMES: [&str; 5] = ["Education", "Experience", "Projects", "Skills", "Other"];

/// Section name to content, as the store parsed it.
pub type SectionMap = BTreeMap<String, String>;

/// A successful reply: the `status` discriminator followed by the body's
/// fields.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSectionRequest {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadReply {
    pub message: String,
    #[serde(default)]
    pub sections: SectionMap,
    #[serde(default)]
    pub full_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReply {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReply {
    pub results: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReply {
    /// Confirmation text from the store, if it sent one.
    #[serde(default)]
    pub message: Option<String>,
    /// Re-parsed sections, sent only when the full resume was replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<SectionMap>,
}

/// Store liveness. `document` is the file name of the held resume.
#[derive(Debug, Serialize)]
pub struct HealthReply {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub document: Option<String>,
    pub upload_limit_bytes: usize,
}
