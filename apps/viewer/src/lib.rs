//! Resume viewer: a section-by-section view/edit client and the section store
//! it talks to.
//!
//! - [`client`] holds the viewer session: view/edit mode, navigation, search
//!   highlighting, and the [`client::SectionStore`] seam.
//! - [`resume`], [`routes`] and [`state`] make up the HTTP section store.
//! - [`protocol`] is the JSON contract between the two.

pub mod client;
pub mod config;
pub mod errors;
pub mod protocol;
pub mod resume;
pub mod routes;
pub mod state;
