use tracing::info;

use crate::client::section::SectionId;
use crate::client::session::Session;
use crate::client::store::{SectionStore, StoreError, UploadFile};

impl<S: SectionStore> Session<S> {
    /// Sends `file` to the store and, once it is ingested, shows the whole
    /// document. A failed upload leaves the session as it was, apart from the
    /// status message.
    pub async fn upload(&mut self, file: &UploadFile) -> Result<(), StoreError> {
        self.state
            .status
            .report(format!("Processing file: {}...", file.name));

        let reply = match self.store.upload(file).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.report_failure("upload", e)),
        };
        info!(file = %file.name, bytes = file.bytes.len(), "document uploaded");

        self.state.view.file_info = Some(format!("File: {}", file.name));
        self.state.status.report(reply.message);
        self.state.document_loaded = true;

        let all = SectionId::all();
        self.state.view.sections.activate(&all);
        self.load_section(all).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::fake::{Call, FakeStore, Op};
    use crate::client::section::SectionId;
    use crate::client::session::{Body, Session};
    use crate::client::store::UploadFile;

    fn resume_pdf() -> UploadFile {
        UploadFile::new("resume.pdf", &b"%PDF-1.4"[..])
    }

    #[tokio::test]
    async fn test_upload_shows_full_document() {
        let mut session = Session::new(FakeStore::with_resume());
        session.select_section("Skills").await.unwrap();
        session.store().clear_calls();

        session.upload(&resume_pdf()).await.unwrap();

        let state = session.state();
        assert_eq!(
            session.store().calls(),
            vec![
                Call::Upload("resume.pdf".into()),
                Call::GetSection("all".into())
            ]
        );
        assert_eq!(state.view.file_info.as_deref(), Some("File: resume.pdf"));
        assert_eq!(state.view.title, "FULL RESUME");
        assert_eq!(
            state.view.body,
            Body::Text("EDUCATION\nBSc\nSKILLS\nRust, Go".into())
        );
        assert!(state.current.is_all());
        assert_eq!(state.view.sections.active(), Some(&SectionId::all()));
        assert!(state.actions().edit);
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_state_untouched() {
        let mut session = Session::new(FakeStore::with_resume());
        session.store().reject(Op::Upload, "Error processing file: bad pdf");

        let err = session.upload(&resume_pdf()).await.unwrap_err();

        let state = session.state();
        assert_eq!(err.to_string(), "Error processing file: bad pdf");
        assert_eq!(state.status.message(), "Error processing file: bad pdf");
        assert!(state.view.file_info.is_none());
        assert!(!state.document_loaded);
        assert!(!state.actions().edit);
        assert_eq!(session.store().calls(), vec![Call::Upload("resume.pdf".into())]);
    }

    #[tokio::test]
    async fn test_upload_transport_failure_is_reported() {
        let mut session = Session::new(FakeStore::with_resume());
        session.store().break_transport(Op::Upload);
        assert!(session.upload(&resume_pdf()).await.is_err());
        assert_eq!(
            session.state().status.message(),
            "Request failed: connection refused"
        );
    }
}
