use std::path::Path as FsPath;

use anyhow::Context;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::protocol::{
    SearchReply, SearchRequest, SectionMap, SectionReply, Success, UpdateReply,
    UpdateSectionRequest, UploadReply, ALL_SECTIONS, FULL_RESUME, UPLOAD_FIELD,
};
use crate::resume::extract::extract_text;
use crate::resume::search::search_resume;
use crate::resume::sections::Sections;
use crate::state::AppState;

fn section_map(sections: &Sections) -> SectionMap {
    sections
        .iter()
        .map(|(name, content)| (name.to_string(), content.to_string()))
        .collect()
}

/// Final path component of a client-supplied file name.
fn safe_file_name(raw: &str) -> String {
    FsPath::new(raw)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Multipart stream errors caused by the body limit name the limit.
fn upload_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(limit)
    } else {
        AppError::Multipart(e)
    }
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Success<UploadReply>>, AppError> {
    let mut multipart = multipart?;
    let limit = state.config.max_upload_bytes;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| upload_error(e, limit))?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let (raw_name, bytes) = upload.ok_or_else(|| AppError::Validation("No file part".into()))?;
    if raw_name.is_empty() {
        return Err(AppError::Validation("No selected file".into()));
    }
    let file_name = safe_file_name(&raw_name);

    let text = {
        let file_name = file_name.clone();
        tokio::task::spawn_blocking(move || extract_text(&file_name, &bytes))
            .await
            .context("text extraction task failed")??
    };

    let mut resume = state.resume.write().await;
    resume.ingest(&file_name, text);
    info!(
        file = %file_name,
        chars = resume.full_text.len(),
        "resume ingested"
    );

    Ok(Json(Success::new(UploadReply {
        message: format!("File processed successfully: {file_name}"),
        sections: section_map(&resume.sections),
        full_text: resume.full_text.clone(),
    })))
}

/// GET /get_section/:section
pub async fn handle_get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<Success<SectionReply>>, AppError> {
    let resume = state.resume.read().await;

    if section == ALL_SECTIONS {
        return Ok(Json(Success::new(SectionReply {
            title: "FULL RESUME".into(),
            content: Some(resume.full_text.clone()),
        })));
    }

    let content = resume
        .sections
        .get(&section)
        .ok_or_else(|| AppError::NotFound(format!("Section '{section}' not found")))?;
    Ok(Json(Success::new(SectionReply {
        title: section.to_uppercase(),
        content: Some(content.to_string()),
    })))
}

/// POST /search
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Success<SearchReply>>, AppError> {
    let Json(req) = payload?;
    let resume = state.resume.read().await;
    let results = search_resume(&resume, &req.query)?;
    Ok(Json(Success::new(SearchReply { results })))
}

/// POST /update_section
pub async fn handle_update_section(
    State(state): State<AppState>,
    payload: Result<Json<UpdateSectionRequest>, JsonRejection>,
) -> Result<Json<Success<UpdateReply>>, AppError> {
    let Json(req) = payload?;
    let (section, content) = match (req.section, req.content) {
        (Some(section), Some(content)) if !section.is_empty() => (section, content),
        _ => return Err(AppError::Validation("Missing section or content".into())),
    };

    let mut resume = state.resume.write().await;

    if section == FULL_RESUME {
        resume.replace_full_text(content);
        info!("full resume replaced");
        return Ok(Json(Success::new(UpdateReply {
            message: Some("Full resume updated successfully".into()),
            sections: Some(section_map(&resume.sections)),
        })));
    }

    if !resume.replace_section(&section, content) {
        return Err(AppError::NotFound(format!("Section '{section}' not found")));
    }
    info!(section = %section, "section replaced");
    Ok(Json(Success::new(UpdateReply {
        message: Some(format!("Section '{section}' updated successfully")),
        sections: None,
    })))
}
