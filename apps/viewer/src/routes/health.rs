use axum::{extract::State, Json};

use crate::protocol::HealthReply;
use crate::state::AppState;

/// GET /health
/// Liveness plus the name of the resume currently held, if any.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReply> {
    let resume = state.resume.read().await;
    Json(HealthReply {
        status: "ok",
        service: "resume-store",
        version: env!("CARGO_PKG_VERSION"),
        document: resume.current_file.clone(),
        upload_limit_bytes: state.config.max_upload_bytes,
    })
}
