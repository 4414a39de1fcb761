//! Export renderers for validated question sets
//!
//! Three formats share one contract: question set in, artifact bytes plus a
//! suggested filename out. Rendering order is always title, numbered MCQs
//! (options then answer line), numbered theory questions; an empty section
//! is omitted entirely, header included.

pub mod docx;
pub mod pdf;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::question::QuestionSet;

/// Document title shared by all renderers
pub const DOCUMENT_TITLE: &str = "Generated Questions";
/// MCQ section header shared by all renderers
pub const MCQ_HEADER: &str = "Multiple Choice Questions:";
/// Theory section header shared by all renderers
pub const THEORY_HEADER: &str = "Theory Questions:";

/// Downloadable export formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text
    Txt,
    /// Paginated PDF
    Pdf,
    /// Word-processing document
    Docx,
}

impl ExportFormat {
    /// Parse a format from its lowercase name
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            other => Err(Error::export(
                other,
                "unknown export format, expected txt, pdf, or docx",
            )),
        }
    }

    /// Default download filename for this format
    pub fn default_filename(&self) -> &'static str {
        match self {
            Self::Txt => "questions.txt",
            Self::Pdf => "questions.pdf",
            Self::Docx => "questions.docx",
        }
    }

    /// Media type of the rendered artifact
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// One rendered downloadable artifact
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Rendered file bytes
    pub bytes: Vec<u8>,
    /// Suggested download filename
    pub filename: String,
    /// Media type for the download response
    pub content_type: &'static str,
}

/// Render a validated question set into one downloadable artifact.
///
/// Export is idempotent; a failure here is fatal to this download only and
/// leaves the question set exportable via the other renderers.
pub fn render(
    format: ExportFormat,
    set: &QuestionSet,
    filename: Option<String>,
) -> Result<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Txt => text::render(set),
        ExportFormat::Pdf => pdf::render(set)?,
        ExportFormat::Docx => docx::render(set)?,
    };

    Ok(ExportArtifact {
        bytes,
        filename: filename.unwrap_or_else(|| format.default_filename().to_string()),
        content_type: format.content_type(),
    })
}
