//! Scripted in-memory `SectionStore` for session tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::section::SectionId;
use crate::client::store::{SectionStore, StoreError, UploadFile};
use crate::protocol::{SearchReply, SectionReply, UpdateReply, UploadReply, FULL_RESUME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Upload,
    GetSection,
    Search,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Upload(String),
    GetSection(String),
    Search(String),
    Update { section: String, content: String },
}

#[derive(Debug, Clone)]
enum Failure {
    Rejected(String),
    Transport(String),
}

#[derive(Default)]
struct FakeState {
    sections: HashMap<String, SectionReply>,
    search_results: Vec<String>,
    failures: HashMap<Op, Failure>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    /// A store holding a small parsed resume. `Other` has no content.
    pub fn with_resume() -> Self {
        let store = Self::default();
        store.put("all", "FULL RESUME", Some("EDUCATION\nBSc\nSKILLS\nRust, Go"));
        store.put("Education", "EDUCATION", Some("BSc Computer Science"));
        store.put("Experience", "EXPERIENCE", Some("Senior Engineer at Acme"));
        store.put("Skills", "SKILLS", Some("Rust, Go"));
        store.put("Other", "OTHER", None);
        store
    }

    pub fn put(&self, id: &str, title: &str, content: Option<&str>) {
        self.state.lock().unwrap().sections.insert(
            id.to_string(),
            SectionReply {
                title: title.to_string(),
                content: content.map(str::to_string),
            },
        );
    }

    pub fn set_search_results(&self, results: &[&str]) {
        self.state.lock().unwrap().search_results =
            results.iter().map(|r| r.to_string()).collect();
    }

    /// Every later call of `op` is rejected with `message` until cleared.
    pub fn reject(&self, op: Op, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, Failure::Rejected(message.to_string()));
    }

    pub fn break_transport(&self, op: Op) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, Failure::Transport("connection refused".to_string()));
    }

    pub fn heal(&self, op: Op) {
        self.state.lock().unwrap().failures.remove(&op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, op: Op, call: Call) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.get(&op) {
            Some(Failure::Rejected(m)) => Err(StoreError::Rejected(m.clone())),
            Some(Failure::Transport(m)) => Err(StoreError::Transport(m.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SectionStore for FakeStore {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReply, StoreError> {
        self.record(Op::Upload, Call::Upload(file.name.clone()))?;
        Ok(UploadReply {
            message: format!("File processed successfully: {}", file.name),
            ..UploadReply::default()
        })
    }

    async fn get_section(&self, id: &SectionId) -> Result<SectionReply, StoreError> {
        self.record(Op::GetSection, Call::GetSection(id.to_string()))?;
        self.state
            .lock()
            .unwrap()
            .sections
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::Rejected(format!("Section '{id}' not found")))
    }

    async fn search(&self, query: &str) -> Result<SearchReply, StoreError> {
        self.record(Op::Search, Call::Search(query.to_string()))?;
        Ok(SearchReply {
            results: self.state.lock().unwrap().search_results.clone(),
        })
    }

    async fn update_section(
        &self,
        section: &str,
        content: &str,
    ) -> Result<UpdateReply, StoreError> {
        self.record(
            Op::Update,
            Call::Update {
                section: section.to_string(),
                content: content.to_string(),
            },
        )?;
        let key = if section == FULL_RESUME { "all" } else { section };
        let mut state = self.state.lock().unwrap();
        let entry = state
            .sections
            .get_mut(key)
            .ok_or_else(|| StoreError::Rejected(format!("Section '{section}' not found")))?;
        entry.content = Some(content.to_string());
        Ok(UpdateReply {
            message: Some(format!("Section '{section}' updated successfully")),
            sections: None,
        })
    }
}
