//! The view/edit mode machine.
//!
//! ```text
//! Viewing --start--------> Editing
//! Editing --save ok------> Viewing   (then reload current section)
//! Editing --save failed--> Editing   (draft kept)
//! Editing --cancel-------> Viewing   (draft dropped, reload current section)
//! ```
//!
//! Transitions are only reachable through handles: [`Session::edit_entry`]
//! yields an [`EditEntry`] only while viewing a loaded document, and
//! [`Session::editing`] yields an [`Editing`] only while editing. Save and
//! cancel consume the handle.

use tracing::info;

use crate::client::session::{Draft, Session, SessionMode};
use crate::client::store::{SectionStore, StoreError};
use crate::protocol::FULL_RESUME;

pub const EDITING_STATUS: &str = "Editing mode. Make changes and save when done.";
pub const CANCELLED_STATUS: &str = "Editing cancelled.";

impl<S: SectionStore> Session<S> {
    /// Entry point for starting an edit. `None` while editing or before a
    /// document has been uploaded.
    pub fn edit_entry(&mut self) -> Option<EditEntry<'_, S>> {
        self.state
            .actions()
            .edit
            .then_some(EditEntry { session: self })
    }

    /// The in-progress edit. `None` while viewing.
    pub fn editing(&mut self) -> Option<Editing<'_, S>> {
        self.state
            .mode
            .is_editing()
            .then_some(Editing { session: self })
    }
}

pub struct EditEntry<'a, S> {
    session: &'a mut Session<S>,
}

impl<'a, S: SectionStore> EditEntry<'a, S> {
    /// Switches to editing with a draft of the last loaded section content.
    pub fn start(self) -> Editing<'a, S> {
        let state = &mut self.session.state;
        state.mode = SessionMode::Editing {
            draft: Draft::new(state.loaded_content.clone()),
        };
        state.status.report(EDITING_STATUS);
        Editing {
            session: self.session,
        }
    }
}

pub struct Editing<'a, S> {
    session: &'a mut Session<S>,
}

impl<'a, S: SectionStore> Editing<'a, S> {
    pub fn draft(&self) -> &str {
        match &self.session.state.mode {
            SessionMode::Editing { draft } => &draft.text,
            SessionMode::Viewing => unreachable!("editing handle exists only in edit mode"),
        }
    }

    pub fn draft_mut(&mut self) -> &mut String {
        match &mut self.session.state.mode {
            SessionMode::Editing { draft } => &mut draft.text,
            SessionMode::Viewing => unreachable!("editing handle exists only in edit mode"),
        }
    }

    /// Writes the draft back to the current section.
    ///
    /// On success the session returns to viewing and reloads the section from
    /// the store, so the display shows what was committed. On failure it stays
    /// in edit mode with the draft untouched.
    pub async fn save(self) -> Result<(), StoreError> {
        let content = self.draft().to_string();
        let session = self.session;
        let target = session.state.current.save_target().to_string();

        let reply = match session.store.update_section(&target, &content).await {
            Ok(reply) => reply,
            Err(e) => return Err(session.report_failure("save", e)),
        };
        info!(
            section = %target,
            bytes = content.len(),
            store_message = reply.message.as_deref().unwrap_or_default(),
            "section saved"
        );

        session.state.mode = SessionMode::Viewing;
        let current = session.state.current.clone();
        session.load_section(current).await?;

        let label = if target == FULL_RESUME {
            "Full resume"
        } else {
            target.as_str()
        };
        session
            .state
            .status
            .report(format!("{label} updated successfully."));
        Ok(())
    }

    /// Drops the draft and re-fetches the current section from the store.
    pub async fn cancel(self) -> Result<(), StoreError> {
        let session = self.session;
        session.state.mode = SessionMode::Viewing;

        let current = session.state.current.clone();
        session.load_section(current).await?;
        session.state.status.report(CANCELLED_STATUS);
        Ok(())
    }
}
