//! Material upload and registry endpoints

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::TextExtractor;
use crate::server::state::AppState;
use crate::types::material::{FileKind, MaterialRecord};

/// Summary of one registered material
#[derive(Serialize)]
pub struct MaterialResponse {
    pub id: Uuid,
    pub filename: String,
    pub kind: FileKind,
    pub byte_length: u64,
    pub characters: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// True when the upload matched an already-registered material by
    /// content hash
    pub deduplicated: bool,
}

impl MaterialResponse {
    fn from_record(record: &MaterialRecord, deduplicated: bool) -> Self {
        Self {
            id: record.id,
            filename: record.filename.clone(),
            kind: record.kind,
            byte_length: record.byte_length,
            characters: record.text.chars().count(),
            created_at: record.created_at,
            deduplicated,
        }
    }
}

/// POST /api/materials - Upload a learning document
pub async fn upload_material(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MaterialResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("upload_{}", Uuid::new_v4()));
        let declared_media_type = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("failed to read file: {}", e)))?;

        tracing::info!("processing upload: {} ({} bytes)", filename, data.len());

        let kind = FileKind::detect(&filename, declared_media_type.as_deref())?;
        let extracted = TextExtractor::extract(kind, &filename, &data)?;

        // Identical content means identical questions; reuse the record
        let content_hash = crate::types::material::hash_content(&extracted.content);
        if let Some(existing) = state.find_material_by_hash(&content_hash) {
            tracing::info!(
                "upload {} deduplicated against material {}",
                filename,
                existing.id
            );
            return Ok(Json(MaterialResponse::from_record(&existing, true)));
        }

        let record = MaterialRecord::new(kind, extracted);
        let response = MaterialResponse::from_record(&record, false);
        state.add_material(record);
        return Ok(Json(response));
    }

    Err(Error::Internal(
        "multipart upload contained no \"file\" field".to_string(),
    ))
}

/// GET /api/materials - List registered materials
pub async fn list_materials(State(state): State<AppState>) -> Json<Vec<MaterialResponse>> {
    let mut materials = state.list_materials();
    materials.sort_by_key(|m| m.created_at);
    Json(
        materials
            .iter()
            .map(|m| MaterialResponse::from_record(m, false))
            .collect(),
    )
}

/// GET /api/materials/:id - Get one material with its extracted text
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaterialRecord>> {
    state
        .get_material(&id)
        .map(Json)
        .ok_or(Error::MaterialNotFound(id))
}

/// DELETE /api/materials/:id - Remove a material
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaterialResponse>> {
    state
        .remove_material(&id)
        .map(|m| Json(MaterialResponse::from_record(&m, false)))
        .ok_or(Error::MaterialNotFound(id))
}
