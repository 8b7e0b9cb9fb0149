use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::resume::ResumeData;

/// Shared store state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The single resume this store serves. Replaced wholesale on upload.
    pub resume: Arc<RwLock<ResumeData>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            resume: Arc::new(RwLock::new(ResumeData::default())),
        }
    }
}
