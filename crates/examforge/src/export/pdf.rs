//! Paginated PDF export renderer built directly on lopdf

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::types::question::QuestionSet;

use super::{DOCUMENT_TITLE, MCQ_HEADER, THEORY_HEADER};

// A4 in points, 50pt margins; fixed line advances keep pagination
// deterministic for identical input
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_X: f32 = 50.0;
const TOP_Y: f32 = 792.0;
const BOTTOM_Y: f32 = 50.0;

const TITLE_SIZE: i64 = 16;
const HEADING_SIZE: i64 = 14;
const BODY_SIZE: i64 = 12;
const ANSWER_SIZE: i64 = 10;

const OPTION_INDENT: f32 = 15.0;

/// Render a question set as a paginated PDF
pub fn render(set: &QuestionSet) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new();

    writer.line(TITLE_SIZE, 0.0, DOCUMENT_TITLE, 24.0)?;

    if !set.mcqs.is_empty() {
        writer.line(HEADING_SIZE, 0.0, MCQ_HEADER, 18.0)?;
        for (index, mcq) in set.mcqs.iter().enumerate() {
            writer.line(BODY_SIZE, 0.0, &format!("{}. {}", index + 1, mcq.question), 16.0)?;
            for option in &mcq.options {
                writer.line(BODY_SIZE, OPTION_INDENT, option, 14.0)?;
            }
            writer.line(
                ANSWER_SIZE,
                OPTION_INDENT,
                &format!("Answer: {}", mcq.answer),
                14.0,
            )?;
            writer.advance(6.0);
        }
    }

    if !set.theory.is_empty() {
        writer.advance(12.0);
        writer.line(HEADING_SIZE, 0.0, THEORY_HEADER, 18.0)?;
        for (index, theory) in set.theory.iter().enumerate() {
            writer.line(BODY_SIZE, 0.0, &format!("{}. {}", index + 1, theory), 16.0)?;
        }
    }

    writer.finish()
}

/// Incremental page writer: lines go onto the current page until the cursor
/// would pass the bottom margin, then a new page starts
struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    kids: Vec<Object>,
    operations: Vec<Operation>,
    y: f32,
}

impl PdfWriter {
    fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        Self {
            doc,
            pages_id,
            resources_id,
            kids: Vec::new(),
            operations: Vec::new(),
            y: TOP_Y,
        }
    }

    /// Emit one text line at the current cursor, breaking the page first if
    /// the advance would overflow it
    fn line(&mut self, size: i64, indent: f32, text: &str, advance: f32) -> Result<()> {
        if self.y - advance < BOTTOM_Y {
            self.flush_page()?;
        }

        self.operations.push(Operation::new("BT", vec![]));
        self.operations
            .push(Operation::new("Tf", vec!["F1".into(), size.into()]));
        self.operations.push(Operation::new(
            "Td",
            vec![(MARGIN_X + indent).into(), self.y.into()],
        ));
        self.operations
            .push(Operation::new("Tj", vec![Object::string_literal(text)]));
        self.operations.push(Operation::new("ET", vec![]));

        self.y -= advance;
        Ok(())
    }

    /// Move the cursor down without emitting text
    fn advance(&mut self, amount: f32) {
        self.y -= amount;
    }

    /// Close the current page and start a fresh one
    fn flush_page(&mut self) -> Result<()> {
        let operations = std::mem::take(&mut self.operations);
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| Error::export("pdf", format!("content stream encoding failed: {}", e)))?;

        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Resources" => self.resources_id,
        });
        self.kids.push(page_id.into());
        self.y = TOP_Y;
        Ok(())
    }

    /// Finish the document and serialize it
    fn finish(mut self) -> Result<Vec<u8>> {
        if !self.operations.is_empty() || self.kids.is_empty() {
            self.flush_page()?;
        }

        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        self.doc
            .save_to(&mut buf)
            .map_err(|e| Error::export("pdf", format!("serialization failed: {}", e)))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::TextExtractor;
    use crate::types::material::FileKind;
    use crate::types::question::Mcq;

    fn mcq(n: usize) -> Mcq {
        Mcq {
            question: format!("Question number {}?", n),
            options: vec![
                "A) first".to_string(),
                "B) second".to_string(),
                "C) third".to_string(),
                "D) fourth".to_string(),
            ],
            answer: "B) second".to_string(),
        }
    }

    #[test]
    fn output_is_a_pdf_document() {
        let set = QuestionSet {
            mcqs: vec![mcq(1)],
            theory: vec![],
        };
        let bytes = render(&set).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn round_trips_through_the_pdf_extractor() {
        let set = QuestionSet {
            mcqs: vec![Mcq {
                question: "2+2?".to_string(),
                options: vec!["A) 3".to_string(), "B) 4".to_string()],
                answer: "B) 4".to_string(),
            }],
            theory: vec!["Explain addition.".to_string()],
        };
        let bytes = render(&set).unwrap();

        let extracted = TextExtractor::extract(FileKind::Pdf, "questions.pdf", &bytes).unwrap();
        assert!(extracted.content.contains("1. 2+2?"));
        assert!(extracted.content.contains("B) 4"));
        assert!(extracted.content.contains("Answer: B) 4"));
        assert!(extracted.content.contains("1. Explain addition."));
    }

    #[test]
    fn long_sets_paginate() {
        let set = QuestionSet {
            mcqs: (1..=20).map(mcq).collect(),
            theory: (1..=10).map(|n| format!("Discuss topic {}.", n)).collect(),
        };
        let bytes = render(&set).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1, "expected more than one page");
    }

    #[test]
    fn short_sets_fit_one_page() {
        let set = QuestionSet {
            mcqs: vec![mcq(1)],
            theory: vec!["One theory question.".to_string()],
        };
        let bytes = render(&set).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let set = QuestionSet {
            mcqs: vec![mcq(1)],
            theory: vec![],
        };
        let bytes = render(&set).unwrap();
        let extracted = TextExtractor::extract(FileKind::Pdf, "q.pdf", &bytes).unwrap();
        assert!(!extracted.content.contains("Theory Questions:"));
    }
}
