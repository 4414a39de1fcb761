//! Completion engine abstractions
//!
//! This module provides the trait the orchestrator dispatches on plus the
//! two concrete HTTP adapters (Gemini primary, Hugging Face secondary).
//! Provider identity and wire format stay behind the trait, so further
//! engines can be added without touching the orchestrator.

pub mod engine;
pub mod gemini;
pub mod huggingface;

pub use engine::CompletionEngine;
pub use gemini::GeminiEngine;
pub use huggingface::HuggingFaceEngine;
