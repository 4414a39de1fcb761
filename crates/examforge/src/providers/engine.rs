//! Completion engine trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text-completion engines used for question generation
///
/// Implementations:
/// - `GeminiEngine`: Google Generative Language API (primary)
/// - `HuggingFaceEngine`: Hugging Face Inference API (secondary)
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Send a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get engine name for logging and attempt records
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
