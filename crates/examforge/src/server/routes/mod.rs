//! API routes for the question generation server

pub mod generate;
pub mod materials;
pub mod questions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Material management - uploads get the larger body limit
        .route(
            "/materials",
            post(materials::upload_material)
                .get(materials::list_materials)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/materials/:id", get(materials::get_material))
        .route("/materials/:id", delete(materials::delete_material))
        // Generation
        .route("/generate", post(generate::generate_questions))
        // Question records and export downloads
        .route("/questions", get(questions::list_questions))
        .route("/questions/:id", get(questions::get_questions))
        .route(
            "/questions/:id/export/:format",
            get(questions::export_questions),
        )
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "examforge",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Exam question generation from uploaded learning documents",
        "endpoints": {
            "POST /api/materials": "Upload a document (txt, pdf, docx, pptx) and extract its text",
            "GET /api/materials": "List uploaded materials",
            "GET /api/materials/:id": "Get one material with extracted text",
            "DELETE /api/materials/:id": "Remove a material",
            "POST /api/generate": "Generate a question set from a material",
            "GET /api/questions": "List generated question sets",
            "GET /api/questions/:id": "Get one question set",
            "GET /api/questions/:id/export/:format": "Download as txt, pdf, or docx"
        },
        "features": {
            "fallback_generation": "Primary engine failures fall back to the secondary automatically",
            "deduplication": "Content-hash based material deduplication",
            "validated_output": "Question sets are structurally validated before they are stored"
        }
    }))
}
