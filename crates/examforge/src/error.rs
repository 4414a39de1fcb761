//! Error types for the question generation pipeline

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error, one variant per failing stage
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Format detector could not classify the input
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Format-specific text extraction failed
    #[error("text extraction failed for {filename}: {reason}")]
    Extraction { filename: String, reason: String },

    /// A completion engine call failed (network, status, empty body)
    #[error("{engine} engine failed: {message}")]
    Engine {
        engine: String,
        kind: EngineErrorKind,
        message: String,
    },

    /// No decodable JSON object in the engine completion
    #[error("could not parse engine completion: {0}")]
    Parse(String),

    /// Decoded question set violated the schema invariants
    #[error("question set validation failed: {0}")]
    Validation(String),

    /// Export rendering failed for one format
    #[error("{format} export failed: {reason}")]
    Export { format: String, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Material not found in the registry
    #[error("material not found: {0}")]
    MaterialNotFound(Uuid),

    /// Question set not found in the registry
    #[error("question set not found: {0}")]
    QuestionSetNotFound(Uuid),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Extraction {
            filename: filename.into(),
            reason: reason.into(),
        }
    }

    /// Create an engine error
    pub fn engine(
        engine: impl Into<String>,
        kind: EngineErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Error::Engine {
            engine: engine.into(),
            kind,
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Export {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error for an engine attempt record
    pub fn engine_error_kind(&self) -> EngineErrorKind {
        match self {
            Error::Engine { kind, .. } => *kind,
            Error::Parse(_) => EngineErrorKind::Parse,
            Error::Validation(_) => EngineErrorKind::Validation,
            _ => EngineErrorKind::Network,
        }
    }

    /// Which pipeline stage this error belongs to, for user-facing messages
    fn stage(&self) -> &'static str {
        match self {
            Error::UnsupportedFormat(_) => "detection",
            Error::Extraction { .. } => "extraction",
            Error::Engine { .. } | Error::Parse(_) | Error::Validation(_) => "generation",
            Error::Export { .. } => "export",
            Error::Config(_) => "configuration",
            Error::MaterialNotFound(_) | Error::QuestionSetNotFound(_) => "lookup",
            Error::Io(_) | Error::Internal(_) => "internal",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Engine { .. } | Error::Parse(_) | Error::Validation(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Export { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MaterialNotFound(_) | Error::QuestionSetNotFound(_) => StatusCode::NOT_FOUND,
            Error::Io(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Classification of a failed engine attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineErrorKind {
    /// Request never completed (connect failure, timeout)
    Network,
    /// Engine returned a non-success HTTP status
    Status,
    /// Engine returned a success status with no usable completion
    Empty,
    /// No balanced JSON object in the completion
    Parse,
    /// Decoded object violated the question-set shape
    Validation,
}

impl std::fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngineErrorKind::Network => "network",
            EngineErrorKind::Status => "status",
            EngineErrorKind::Empty => "empty",
            EngineErrorKind::Parse => "parse",
            EngineErrorKind::Validation => "validation",
        };
        f.write_str(s)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    stage: &'static str,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
            stage: self.stage(),
        };
        (status, Json(body)).into_response()
    }
}
