//! Viewer session: the view/edit state machine and its flows against a
//! [`SectionStore`].

pub mod edit;
pub mod http;
pub mod navigator;
pub mod search;
pub mod section;
pub mod session;
pub mod status;
pub mod store;
pub mod upload;

#[cfg(test)]
pub(crate) mod fake;

pub use edit::{EditEntry, Editing};
pub use http::HttpSectionStore;
pub use section::{SectionId, SectionList};
pub use session::{Actions, Body, Draft, Session, SessionMode, SessionState, View};
pub use status::StatusReporter;
pub use store::{SectionStore, StoreError, UploadFile};
