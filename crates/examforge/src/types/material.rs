//! Uploaded material types and file format detection

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{Error, Result};

/// OOXML media type for .docx files
const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// OOXML media type for .pptx files
const PPTX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Supported input file kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Plain text file
    Txt,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Microsoft PowerPoint presentation (.pptx)
    Pptx,
}

impl FileKind {
    /// Classify an input file from its declared media type and filename.
    ///
    /// The declared media type wins when it matches a known value; otherwise
    /// detection falls back to case-insensitive suffix matching. Anything
    /// else is rejected before extraction is attempted.
    pub fn detect(filename: &str, declared_media_type: Option<&str>) -> Result<Self> {
        if let Some(media_type) = declared_media_type {
            // Media type values may carry parameters ("text/plain; charset=utf-8")
            let essence = media_type.split(';').next().unwrap_or("").trim();
            match essence {
                "text/plain" => return Ok(Self::Txt),
                "application/pdf" => return Ok(Self::Pdf),
                DOCX_MEDIA_TYPE => return Ok(Self::Docx),
                PPTX_MEDIA_TYPE => return Ok(Self::Pptx),
                _ => {}
            }
        }

        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        match extension.as_str() {
            "txt" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "pptx" => Ok(Self::Pptx),
            _ => Err(Error::UnsupportedFormat(format!(
                "{}: please upload a PDF, DOCX, PPTX, or TXT file",
                filename
            ))),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Txt => "Text File",
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Pptx => "PowerPoint (.pptx)",
        }
    }
}

/// Normalized text extracted from one uploaded file.
///
/// Created once per upload and consumed exactly once by prompt construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Extracted text content
    pub content: String,
    /// Original filename the text came from
    pub source_name: String,
    /// Size of the raw input in bytes
    pub byte_length: usize,
}

/// A material that has been uploaded and extracted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Unique material ID
    pub id: Uuid,
    /// Original filename as uploaded by the user
    pub filename: String,
    /// Detected file kind
    pub kind: FileKind,
    /// Extracted text content
    pub text: String,
    /// Size of the uploaded file in bytes
    pub byte_length: u64,
    /// Content hash for deduplication
    pub content_hash: String,
    /// Upload timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl MaterialRecord {
    /// Create a new material record from extracted text
    pub fn new(kind: FileKind, extracted: ExtractedText) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_hash: hash_content(&extracted.content),
            filename: extracted.source_name,
            kind,
            byte_length: extracted.byte_length as u64,
            text: extracted.content,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Hash content for deduplication
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_trusts_declared_media_type() {
        let kind = FileKind::detect("notes", Some("application/pdf")).unwrap();
        assert_eq!(kind, FileKind::Pdf);

        // Parameters after the essence are ignored
        let kind = FileKind::detect("notes", Some("text/plain; charset=utf-8")).unwrap();
        assert_eq!(kind, FileKind::Txt);
    }

    #[test]
    fn detect_falls_back_to_suffix() {
        assert_eq!(
            FileKind::detect("slides.PPTX", None).unwrap(),
            FileKind::Pptx
        );
        assert_eq!(
            FileKind::detect("paper.docx", Some("application/octet-stream")).unwrap(),
            FileKind::Docx
        );
    }

    #[test]
    fn detect_rejects_unknown_formats() {
        let err = FileKind::detect("image.png", Some("image/png")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));

        let err = FileKind::detect("archive.tar.gz", None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn identical_content_hashes_identically() {
        assert_eq!(hash_content("abc"), hash_content("abc"));
        assert_ne!(hash_content("abc"), hash_content("abd"));
    }
}
