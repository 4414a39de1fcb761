//! Question set types and structural validation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A multiple-choice question.
///
/// Options are order-significant and carry their labels ("A) ...") as part
/// of the string; `answer` is the literal text of the correct option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mcq {
    /// Question text
    pub question: String,
    /// Ordered answer options, at least two
    pub options: Vec<String>,
    /// Literal text of the correct option
    pub answer: String,
}

impl Mcq {
    /// Whether `answer` matches one of `options`.
    ///
    /// Comparison is trimmed and case-sensitive: serialization whitespace is
    /// forgiven, but a case change produces a different option string.
    pub fn answer_in_options(&self) -> bool {
        let answer = self.answer.trim();
        self.options.iter().any(|opt| opt.trim() == answer)
    }
}

/// A validated set of generated exam questions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSet {
    /// Multiple-choice questions, in generation order
    pub mcqs: Vec<Mcq>,
    /// Free-response theory questions, in generation order
    pub theory: Vec<String>,
}

impl QuestionSet {
    /// Validate the structural invariants of the set.
    ///
    /// Either sequence may be empty, but the set as a whole must contain at
    /// least one item. Every MCQ needs a non-empty question, at least two
    /// non-empty options, and an answer equal to one of them.
    pub fn validate(&self) -> Result<()> {
        if self.mcqs.is_empty() && self.theory.is_empty() {
            return Err(Error::Validation(
                "question set contains no MCQs and no theory questions".to_string(),
            ));
        }

        for (i, mcq) in self.mcqs.iter().enumerate() {
            if mcq.question.trim().is_empty() {
                return Err(Error::Validation(format!("MCQ {} has an empty question", i + 1)));
            }
            if mcq.options.len() < 2 {
                return Err(Error::Validation(format!(
                    "MCQ {} has {} option(s), need at least 2",
                    i + 1,
                    mcq.options.len()
                )));
            }
            if mcq.options.iter().any(|opt| opt.trim().is_empty()) {
                return Err(Error::Validation(format!("MCQ {} has an empty option", i + 1)));
            }
            if !mcq.answer_in_options() {
                return Err(Error::Validation(format!(
                    "MCQ {} answer \"{}\" is not one of its options",
                    i + 1,
                    mcq.answer
                )));
            }
        }

        for (i, theory) in self.theory.iter().enumerate() {
            if theory.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "theory question {} is empty",
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// Total number of questions in the set
    pub fn len(&self) -> usize {
        self.mcqs.len() + self.theory.len()
    }

    /// Whether the set contains no questions at all
    pub fn is_empty(&self) -> bool {
        self.mcqs.is_empty() && self.theory.is_empty()
    }
}

/// A stored question set tied to the material it was generated from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique record ID
    pub id: Uuid,
    /// Material the questions were generated from
    pub material_id: Uuid,
    /// The validated question set
    pub question_set: QuestionSet,
    /// Name of the engine that produced the set
    pub engine: String,
    /// Generation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QuestionRecord {
    /// Create a new record for a validated question set
    pub fn new(material_id: Uuid, question_set: QuestionSet, engine: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            material_id,
            question_set,
            engine,
            created_at: chrono::Utc::now(),
        }
    }
}
