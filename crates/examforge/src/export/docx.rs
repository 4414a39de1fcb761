//! Word-processing document export renderer via the docx-rs builder

use docx_rs::{Docx, Paragraph, Run};

use crate::error::{Error, Result};
use crate::types::question::QuestionSet;

use super::{DOCUMENT_TITLE, MCQ_HEADER, THEORY_HEADER};

// Run sizes are half-points
const TITLE_SIZE: usize = 32;
const HEADING_SIZE: usize = 28;

/// Render a question set as a .docx document
pub fn render(set: &QuestionSet) -> Result<Vec<u8>> {
    let mut docx = Docx::new().add_paragraph(
        Paragraph::new().add_run(Run::new().add_text(DOCUMENT_TITLE).bold().size(TITLE_SIZE)),
    );

    if !set.mcqs.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(MCQ_HEADER).bold().size(HEADING_SIZE)),
        );

        for (index, mcq) in set.mcqs.iter().enumerate() {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!("{}. {}", index + 1, mcq.question))
                        .bold(),
                ),
            );
            for option in &mcq.options {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text(format!("   {}", option))),
                );
            }
            docx = docx.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!("   Answer: {}", mcq.answer))
                        .italic(),
                ),
            );
            // Blank spacer between questions
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text("")));
        }
    }

    if !set.theory.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(THEORY_HEADER).bold().size(HEADING_SIZE)),
        );

        for (index, theory) in set.theory.iter().enumerate() {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("{}. {}", index + 1, theory))),
            );
        }
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| Error::export("docx", format!("packaging failed: {}", e)))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::TextExtractor;
    use crate::types::material::FileKind;
    use crate::types::question::Mcq;

    fn sample_set() -> QuestionSet {
        QuestionSet {
            mcqs: vec![Mcq {
                question: "2+2?".to_string(),
                options: vec!["A) 3".to_string(), "B) 4".to_string()],
                answer: "B) 4".to_string(),
            }],
            theory: vec!["Explain addition.".to_string()],
        }
    }

    #[test]
    fn round_trips_through_the_docx_extractor() {
        let bytes = render(&sample_set()).unwrap();
        let extracted = TextExtractor::extract(FileKind::Docx, "questions.docx", &bytes).unwrap();

        assert!(extracted.content.contains("Generated Questions"));
        assert!(extracted.content.contains("1. 2+2?"));
        assert!(extracted.content.contains("   B) 4"));
        assert!(extracted.content.contains("   Answer: B) 4"));
        assert!(extracted.content.contains("1. Explain addition."));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let theory_only = QuestionSet {
            mcqs: vec![],
            theory: vec!["Describe the water cycle.".to_string()],
        };
        let bytes = render(&theory_only).unwrap();
        let extracted = TextExtractor::extract(FileKind::Docx, "q.docx", &bytes).unwrap();

        assert!(!extracted.content.contains(MCQ_HEADER));
        assert!(extracted.content.contains(THEORY_HEADER));
    }

    #[test]
    fn question_counts_survive_the_round_trip() {
        let set = QuestionSet {
            mcqs: (1..=3)
                .map(|n| Mcq {
                    question: format!("q{}", n),
                    options: vec!["A) x".to_string(), "B) y".to_string()],
                    answer: "A) x".to_string(),
                })
                .collect(),
            theory: vec!["t1".to_string(), "t2".to_string()],
        };
        let bytes = render(&set).unwrap();
        let extracted = TextExtractor::extract(FileKind::Docx, "q.docx", &bytes).unwrap();

        let mcq_lines = (1..=3).filter(|n| extracted.content.contains(&format!("{}. q{}", n, n))).count();
        assert_eq!(mcq_lines, 3);
        assert!(extracted.content.contains("1. t1"));
        assert!(extracted.content.contains("2. t2"));
    }
}
