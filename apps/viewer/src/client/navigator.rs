use tracing::debug;

use crate::client::section::SectionId;
use crate::client::session::{Body, Session, SessionMode, NO_CONTENT_PLACEHOLDER};
use crate::client::store::{SectionStore, StoreError};
use crate::protocol::SectionReply;

impl<S: SectionStore> Session<S> {
    /// Marks a listed section active and loads it.
    ///
    /// Ids outside the listing are refused with a status message and no
    /// request is sent.
    pub async fn select_section(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(id) = self.state.view.sections.find(id).cloned() else {
            self.state.status.report(format!("Unknown section '{id}'."));
            return Ok(());
        };
        self.state.view.sections.activate(&id);
        self.load_section(id).await
    }

    /// Points the session at `id` and displays what the store holds for it.
    ///
    /// The current section is updated before the request, so a failed load
    /// still leaves save and cancel targeting `id`. On failure the display is
    /// left as it was.
    pub(crate) async fn load_section(&mut self, id: SectionId) -> Result<(), StoreError> {
        debug!(section = %id, "loading section");
        self.state.current = id.clone();

        match self.store.get_section(&id).await {
            Ok(reply) => {
                self.show_section(reply);
                Ok(())
            }
            Err(e) => Err(self.report_failure("load_section", e)),
        }
    }

    fn show_section(&mut self, reply: SectionReply) {
        let content = reply.content.unwrap_or_default();

        self.state.view.body = if content.is_empty() {
            Body::Text(NO_CONTENT_PLACEHOLDER.to_string())
        } else {
            Body::Text(content.clone())
        };
        if let SessionMode::Editing { draft } = &mut self.state.mode {
            draft.text = content.clone();
        }
        self.state.loaded_content = content;

        self.state
            .status
            .report(format!("Section {} loaded.", reply.title));
        self.state.view.title = reply.title;
    }
}
