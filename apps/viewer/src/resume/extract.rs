use std::path::Path;

use crate::errors::AppError;

/// Plain-text extensions read as UTF-8.
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Pulls the text out of an uploaded file, dispatching on its extension.
///
/// PDFs go through `pdf-extract`. Scanned documents and images would need OCR,
/// which this store does not do, so they are refused.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("Error processing file: {e}"))),
        "" => decode_utf8(bytes),
        e if TEXT_EXTENSIONS.contains(&e) => decode_utf8(bytes),
        other => Err(AppError::Validation(format!(
            "Unsupported file type: .{other}"
        ))),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, AppError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| {
        AppError::UnprocessableEntity("Error processing file: text is not valid UTF-8".to_string())
    })
}
