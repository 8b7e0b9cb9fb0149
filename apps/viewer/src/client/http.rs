//! `SectionStore` over HTTP, speaking the store's JSON protocol.
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::section::SectionId;
use crate::client::store::{decode_reply, SectionStore, StoreError, UploadFile};
use crate::protocol::{
    SearchReply, SearchRequest, SectionReply, UpdateReply, UpdateSectionRequest, UploadReply,
    UPLOAD_FIELD,
};

#[derive(Clone)]
pub struct HttpSectionStore {
    client: Client,
    base: Url,
}

impl HttpSectionStore {
    /// `timeout` of `None` lets requests run until the server answers.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("STORE_URL '{base_url}' is not a valid URL"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("STORE_URL '{base_url}' cannot be used as a base URL");
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Reads a reply body regardless of HTTP status; the JSON `status` field
    /// decides success.
    async fn read_reply<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let http_status = response.status();
        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| {
            StoreError::Transport(format!("malformed response (HTTP {http_status}): {e}"))
        })?;
        decode_reply(value)
    }
}

#[async_trait]
impl SectionStore for HttpSectionStore {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReply, StoreError> {
        let url = self.endpoint(&["upload"]);
        debug!(%url, file = %file.name, "POST upload");
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.client.post(url).multipart(form).send().await?;
        Self::read_reply(response).await
    }

    async fn get_section(&self, id: &SectionId) -> Result<SectionReply, StoreError> {
        let url = self.endpoint(&["get_section", id.as_str()]);
        debug!(%url, "GET section");
        let response = self.client.get(url).send().await?;
        Self::read_reply(response).await
    }

    async fn search(&self, query: &str) -> Result<SearchReply, StoreError> {
        let url = self.endpoint(&["search"]);
        debug!(%url, query, "POST search");
        let body = SearchRequest {
            query: query.to_string(),
        };
        let response = self.client.post(url).json(&body).send().await?;
        Self::read_reply(response).await
    }

    async fn update_section(
        &self,
        section: &str,
        content: &str,
    ) -> Result<UpdateReply, StoreError> {
        let url = self.endpoint(&["update_section"]);
        debug!(%url, section, "POST update_section");
        let body = UpdateSectionRequest {
            section: Some(section.to_string()),
            content: Some(content.to_string()),
        };
        let response = self.client.post(url).json(&body).send().await?;
        Self::read_reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::Html, routing::get, Router};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}")
    }

    #[test]
    fn test_endpoint_encodes_section_id() {
        let store = HttpSectionStore::new("http://127.0.0.1:5000", None).unwrap();
        assert_eq!(
            store.endpoint(&["get_section", "Work History"]).as_str(),
            "http://127.0.0.1:5000/get_section/Work%20History"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = HttpSectionStore::new("http://localhost/resume/", None).unwrap();
        assert_eq!(
            store.endpoint(&["search"]).as_str(),
            "http://localhost/resume/search"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpSectionStore::new("not a url", None).is_err());
        assert!(HttpSectionStore::new("mailto:someone@example.com", None).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = HttpSectionStore::new(&format!("http://{addr}"), None).unwrap();
        let err = store.get_section(&SectionId::all()).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_transport_failure() {
        let router = Router::new().route(
            "/get_section/:section",
            get(|| async { (StatusCode::BAD_GATEWAY, Html("<h1>502 Bad Gateway</h1>")) }),
        );
        let store = HttpSectionStore::new(&serve(router).await, None).unwrap();

        let err = store.get_section(&SectionId::all()).await.unwrap_err();
        match err {
            StoreError::Transport(detail) => {
                assert!(detail.starts_with("malformed response (HTTP 502 Bad Gateway)"))
            }
            other => panic!("expected transport failure, got {other:?}"),
        }
    }
}
