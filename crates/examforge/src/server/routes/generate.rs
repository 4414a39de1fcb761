//! Question generation endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::generation::EngineAttempt;
use crate::server::state::AppState;
use crate::types::question::{QuestionRecord, QuestionSet};
use crate::types::request::{EngineChoice, GenerationRequest};

/// Request body for POST /api/generate
#[derive(Deserialize)]
pub struct GenerateApiRequest {
    /// Material to generate questions from
    pub material_id: Uuid,
    /// Free-form user instruction
    pub prompt: String,
    /// Engine selection mode
    #[serde(default)]
    pub engine: EngineChoice,
}

/// Response body for POST /api/generate
#[derive(Serialize)]
pub struct GenerateResponse {
    /// ID of the stored question record
    pub question_id: Uuid,
    /// Engine that produced the set
    pub engine: String,
    /// Failed attempts that preceded the success
    pub attempts: Vec<EngineAttempt>,
    /// The validated question set
    pub question_set: QuestionSet,
    pub processing_time_ms: u64,
}

/// POST /api/generate - Generate a question set from a registered material
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateApiRequest>,
) -> Result<Json<GenerateResponse>> {
    let start = Instant::now();

    let material = state
        .get_material(&request.material_id)
        .ok_or(Error::MaterialNotFound(request.material_id))?;

    tracing::info!(
        "generating questions for material {} ({}, engine mode {:?})",
        material.id,
        material.filename,
        request.engine
    );

    let generation_request = GenerationRequest {
        text: material.text,
        user_prompt: request.prompt,
        engine: request.engine,
    };

    let outcome = state.orchestrator().generate(&generation_request).await?;

    let record = QuestionRecord::new(
        request.material_id,
        outcome.question_set.clone(),
        outcome.engine.clone(),
    );
    let question_id = record.id;
    state.add_questions(record);

    Ok(Json(GenerateResponse {
        question_id,
        engine: outcome.engine,
        attempts: outcome.attempts,
        question_set: outcome.question_set,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}
