//! Session state: view/edit mode, the current section, and what is on screen.
//!
//! All mutable state of one viewer session lives in [`SessionState`], owned by
//! [`Session`]. The action flows are `impl` blocks on `Session` in sibling
//! modules (`upload`, `navigator`, `search`, `edit`).

use crate::client::section::{SectionId, SectionList};
use crate::client::status::StatusReporter;
use crate::client::store::{SectionStore, StoreError};

/// Shown when a section loads successfully but has no text.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content available for this section.";

/// The editable copy of a section's content while an edit is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Viewing,
    Editing {
        draft: Draft,
    },
}

impl SessionMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, SessionMode::Editing { .. })
    }
}

/// What the read-only pane shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    /// Plain text, shown literally.
    Text(String),
    /// Markup produced by search highlighting. Document text inside it is
    /// already escaped.
    Markup(String),
}

impl Body {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Empty => "",
            Body::Text(s) | Body::Markup(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// `File: <name>` once an upload succeeded.
    pub file_info: Option<String>,
    pub title: String,
    pub body: Body,
    pub sections: SectionList,
}

/// Which actions the front end should offer. Derived from the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actions {
    pub edit: bool,
    pub save: bool,
    pub cancel: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub mode: SessionMode,
    /// Section the last navigation targeted. Save and cancel act on it.
    pub current: SectionId,
    /// Raw content of the last section that loaded successfully. Seeds the
    /// draft when editing starts.
    pub loaded_content: String,
    pub document_loaded: bool,
    pub view: View,
    pub status: StatusReporter,
}

impl SessionState {
    pub fn actions(&self) -> Actions {
        let editing = self.mode.is_editing();
        Actions {
            edit: !editing && self.document_loaded,
            save: editing,
            cancel: editing,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.mode {
            SessionMode::Editing { draft } => Some(draft),
            SessionMode::Viewing => None,
        }
    }
}

/// A viewer session bound to one section store.
pub struct Session<S> {
    pub(crate) store: S,
    pub(crate) state: SessionState,
}

impl<S: SectionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes a failed request to the status slot and hands the error back.
    pub(crate) fn report_failure(&mut self, action: &str, err: StoreError) -> StoreError {
        tracing::warn!(action, error = %err, "store request failed");
        self.state.status.report(err.to_string());
        err
    }
}
