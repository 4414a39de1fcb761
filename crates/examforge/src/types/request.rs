//! Generation request types

use serde::{Deserialize, Serialize};

/// Which engine(s) a generation request may use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EngineChoice {
    /// Try the primary engine, fall back to the secondary on failure
    #[default]
    Auto,
    /// Use only the primary engine; its failure is terminal
    Primary,
    /// Use only the secondary engine; its failure is terminal
    Secondary,
}

/// One request to generate a question set from extracted text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Extracted material text the questions are drawn from
    pub text: String,
    /// Free-form user instruction ("10 MCQs about chapter 3", ...)
    pub user_prompt: String,
    /// Engine selection mode
    #[serde(default)]
    pub engine: EngineChoice,
}
