//! The capability the viewer session talks to: a remote store holding the
//! parsed resume.
//!
//! `SectionStore` is the only seam between session logic and the network. The
//! session holds a `S: SectionStore` so tests can swap in a scripted fake.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::client::section::SectionId;
use crate::protocol::{SearchReply, SectionReply, UpdateReply, UploadReply, STATUS_SUCCESS};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Well-formed reply with a non-success status. Displays the store's
    /// message verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The request did not complete or the reply could not be understood.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Transport(format!("malformed response: {e}"))
    }
}

/// A file picked for upload: its display name plus raw bytes.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, naming it after the final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("'{}' does not name a file", path.display()))?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Ok(Self::new(name, bytes))
    }
}

/// Request/response contract of the remote section store.
#[async_trait]
pub trait SectionStore: Send + Sync {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReply, StoreError>;

    async fn get_section(&self, id: &SectionId) -> Result<SectionReply, StoreError>;

    async fn search(&self, query: &str) -> Result<SearchReply, StoreError>;

    async fn update_section(&self, section: &str, content: &str)
        -> Result<UpdateReply, StoreError>;
}

/// Interprets a store reply body.
///
/// A `status` of `"success"` deserializes the rest of the body into `T`; any
/// other status becomes [`StoreError::Rejected`] with the reply's message. A
/// body without a string `status` is a transport failure.
pub fn decode_reply<T: DeserializeOwned>(body: Value) -> Result<T, StoreError> {
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Transport("reply is missing a status field".to_string()))?;

    if status != STATUS_SUCCESS {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("store replied with status '{status}'"));
        return Err(StoreError::Rejected(message));
    }

    Ok(serde_json::from_value(body)?)
}
