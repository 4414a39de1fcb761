//! examforge: exam question generation from uploaded learning documents
//!
//! This crate implements the full document-to-questions pipeline: format
//! detection, per-format text extraction, prompt construction, generation
//! against fallback-ordered completion engines, structural validation of the
//! engine output, and export of the validated question set as TXT, PDF, or
//! DOCX artifacts.

pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

pub use config::ExamForgeConfig;
pub use error::{EngineErrorKind, Error, Result};
pub use types::{
    material::{ExtractedText, FileKind, MaterialRecord},
    question::{Mcq, QuestionRecord, QuestionSet},
    request::{EngineChoice, GenerationRequest},
};
