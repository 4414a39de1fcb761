//! Application state for the question generation server

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ExamForgeConfig;
use crate::error::Result;
use crate::generation::GenerationOrchestrator;
use crate::providers::{CompletionEngine, GeminiEngine, HuggingFaceEngine};
use crate::types::material::MaterialRecord;
use crate::types::question::QuestionRecord;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ExamForgeConfig,
    /// Fallback-ordered generation orchestrator
    orchestrator: GenerationOrchestrator,
    /// Uploaded material registry
    materials: DashMap<Uuid, MaterialRecord>,
    /// Generated question set registry
    questions: DashMap<Uuid, QuestionRecord>,
}

impl AppState {
    /// Create new application state, wiring the engines in fallback order
    pub fn new(config: ExamForgeConfig) -> Result<Self> {
        let timeout = config.engines.timeout();

        let gemini = Arc::new(GeminiEngine::new(&config.engines.gemini, timeout)?);
        let huggingface = Arc::new(HuggingFaceEngine::new(&config.engines.huggingface, timeout)?);
        tracing::info!(
            "engines initialized (primary: {} {}, secondary: {} {})",
            gemini.name(),
            gemini.model(),
            huggingface.name(),
            huggingface.model()
        );

        let orchestrator = GenerationOrchestrator::new(vec![
            gemini as Arc<dyn CompletionEngine>,
            huggingface as Arc<dyn CompletionEngine>,
        ])?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                orchestrator,
                materials: DashMap::new(),
                questions: DashMap::new(),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &ExamForgeConfig {
        &self.inner.config
    }

    /// Get the generation orchestrator
    pub fn orchestrator(&self) -> &GenerationOrchestrator {
        &self.inner.orchestrator
    }

    /// Add a material to the registry
    pub fn add_material(&self, material: MaterialRecord) {
        self.inner.materials.insert(material.id, material);
    }

    /// Get a material by ID
    pub fn get_material(&self, id: &Uuid) -> Option<MaterialRecord> {
        self.inner.materials.get(id).map(|m| m.clone())
    }

    /// Remove a material
    pub fn remove_material(&self, id: &Uuid) -> Option<MaterialRecord> {
        self.inner.materials.remove(id).map(|(_, m)| m)
    }

    /// List all materials
    pub fn list_materials(&self) -> Vec<MaterialRecord> {
        self.inner
            .materials
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Find a material with identical content
    pub fn find_material_by_hash(&self, content_hash: &str) -> Option<MaterialRecord> {
        self.inner
            .materials
            .iter()
            .find(|entry| entry.value().content_hash == content_hash)
            .map(|entry| entry.value().clone())
    }

    /// Add a question record; the set crossing this boundary has already
    /// passed validation
    pub fn add_questions(&self, record: QuestionRecord) {
        self.inner.questions.insert(record.id, record);
    }

    /// Get a question record by ID
    pub fn get_questions(&self, id: &Uuid) -> Option<QuestionRecord> {
        self.inner.questions.get(id).map(|q| q.clone())
    }

    /// List all question records
    pub fn list_questions(&self) -> Vec<QuestionRecord> {
        self.inner
            .questions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
