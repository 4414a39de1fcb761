//! Core data types for materials, question sets, and generation requests

pub mod material;
pub mod question;
pub mod request;

pub use material::{ExtractedText, FileKind, MaterialRecord};
pub use question::{Mcq, QuestionRecord, QuestionSet};
pub use request::{EngineChoice, GenerationRequest};
