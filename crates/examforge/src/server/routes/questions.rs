//! Question record retrieval and export download endpoints

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::export::{self, ExportFormat};
use crate::server::state::AppState;
use crate::types::question::QuestionRecord;

/// GET /api/questions - List stored question records
pub async fn list_questions(State(state): State<AppState>) -> Json<Vec<QuestionRecord>> {
    let mut questions = state.list_questions();
    questions.sort_by_key(|q| q.created_at);
    Json(questions)
}

/// GET /api/questions/:id - Get one question record
pub async fn get_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionRecord>> {
    state
        .get_questions(&id)
        .map(Json)
        .ok_or(Error::QuestionSetNotFound(id))
}

/// Query parameters for export downloads
#[derive(Deserialize)]
pub struct ExportQuery {
    /// Download filename override
    pub filename: Option<String>,
}

/// GET /api/questions/:id/export/:format - Download a rendered artifact
pub async fn export_questions(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let format = ExportFormat::parse(&format)?;
    let record = state
        .get_questions(&id)
        .ok_or(Error::QuestionSetNotFound(id))?;

    let artifact = export::render(format, &record.question_set, query.filename)?;

    tracing::info!(
        "exported question set {} as {} ({} bytes)",
        id,
        artifact.filename,
        artifact.bytes.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", artifact.filename.replace('"', ""));
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
