//! Plain-text export renderer

use crate::types::question::QuestionSet;

use super::{DOCUMENT_TITLE, MCQ_HEADER, THEORY_HEADER};

/// Render a question set as plain text
pub fn render(set: &QuestionSet) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(DOCUMENT_TITLE);
    out.push('\n');
    out.push_str("==================\n\n");

    if !set.mcqs.is_empty() {
        out.push_str(MCQ_HEADER);
        out.push('\n');
        out.push_str("---------------------------\n");

        for (index, mcq) in set.mcqs.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, mcq.question));
            for option in &mcq.options {
                out.push_str(&format!("   {}\n", option));
            }
            out.push_str(&format!("   Answer: {}\n\n", mcq.answer));
        }
    }

    if !set.theory.is_empty() {
        out.push_str("\n");
        out.push_str(THEORY_HEADER);
        out.push('\n');
        out.push_str("-----------------\n");

        for (index, theory) in set.theory.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, theory));
        }
    }

    out.into_bytes()
}
