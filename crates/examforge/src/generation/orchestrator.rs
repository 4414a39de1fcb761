//! Two-tier generation orchestration with ordered engine fallback

use serde::Serialize;
use std::sync::Arc;

use crate::error::{EngineErrorKind, Error, Result};
use crate::generation::parse::parse_question_set;
use crate::generation::prompt::PromptBuilder;
use crate::providers::CompletionEngine;
use crate::types::question::QuestionSet;
use crate::types::request::{EngineChoice, GenerationRequest};

/// Record of one failed engine attempt.
///
/// Failures of earlier attempts are recorded here rather than raised when a
/// later engine succeeds.
#[derive(Debug, Clone, Serialize)]
pub struct EngineAttempt {
    /// Engine that failed
    pub engine: String,
    /// Failure classification
    pub kind: EngineErrorKind,
    /// Human-readable failure message
    pub message: String,
}

/// Successful result of a generation request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    /// The validated question set
    pub question_set: QuestionSet,
    /// Name of the engine that produced it
    pub engine: String,
    /// Failed attempts that preceded the success
    pub attempts: Vec<EngineAttempt>,
}

/// Orchestrates generation across an ordered list of completion engines.
///
/// Index 0 is the primary engine, index 1 the secondary. `Auto` requests
/// walk the list in order, one attempt per engine, strictly sequentially;
/// a pinned request uses exactly one engine with no fallback. Adding a third
/// engine is a matter of pushing onto the list.
pub struct GenerationOrchestrator {
    engines: Vec<Arc<dyn CompletionEngine>>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator over fallback-ordered engines
    pub fn new(engines: Vec<Arc<dyn CompletionEngine>>) -> Result<Self> {
        if engines.is_empty() {
            return Err(Error::Config(
                "orchestrator needs at least one completion engine".to_string(),
            ));
        }
        Ok(Self { engines })
    }

    /// Run one generation request to a single outcome.
    ///
    /// An attempt is a completion call followed by parse and validation of
    /// its output; any failure along that path fails the attempt. Attempt
    /// failures are logged with the causing engine and recorded in the
    /// outcome, never silently swallowed.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let prompt = PromptBuilder::build_generation_prompt(&request.text, &request.user_prompt);

        let candidates: &[Arc<dyn CompletionEngine>] = match request.engine {
            EngineChoice::Auto => &self.engines,
            EngineChoice::Primary => std::slice::from_ref(&self.engines[0]),
            EngineChoice::Secondary => {
                let secondary = self.engines.get(1).ok_or_else(|| {
                    Error::Config("no secondary engine is configured".to_string())
                })?;
                std::slice::from_ref(secondary)
            }
        };

        let mut attempts = Vec::new();
        let mut last_error = None;

        for engine in candidates {
            match Self::attempt(engine.as_ref(), &prompt).await {
                Ok(question_set) => {
                    tracing::info!(
                        "engine {} produced {} question(s) after {} failed attempt(s)",
                        engine.name(),
                        question_set.len(),
                        attempts.len()
                    );
                    return Ok(GenerationOutcome {
                        question_set,
                        engine: engine.name().to_string(),
                        attempts,
                    });
                }
                Err(e) => {
                    tracing::warn!("engine {} attempt failed: {}", engine.name(), e);
                    attempts.push(EngineAttempt {
                        engine: engine.name().to_string(),
                        kind: e.engine_error_kind(),
                        message: e.to_string(),
                    });
                    last_error = Some(e);
                }
            }
        }

        let error = last_error.unwrap_or_else(|| {
            Error::Internal("generation finished without any attempt".to_string())
        });
        tracing::error!("generation exhausted all engines: {}", error);
        Err(error)
    }

    /// One engine attempt: complete, then parse and validate the completion
    async fn attempt(engine: &dyn CompletionEngine, prompt: &str) -> Result<QuestionSet> {
        let completion = engine.complete(prompt).await?;
        parse_question_set(&completion)
    }

    /// Names of the configured engines, fallback order preserved
    pub fn engine_names(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const VALID_COMPLETION: &str = r#"{
        "mcqs": [
            {"question": "2+2?", "options": ["A) 3", "B) 4"], "answer": "B) 4"}
        ],
        "theory": ["Explain addition."]
    }"#;

    /// Engine that returns a scripted result and counts its calls
    struct ScriptedEngine {
        name: &'static str,
        result: std::result::Result<String, &'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedEngine {
        fn ok(name: &'static str, completion: &str) -> Arc<Self> {
            Arc::new(Self {
                name,
                result: Ok(completion.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, message: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                result: Err(message),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionEngine for ScriptedEngine {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(Error::engine(
                    self.name,
                    EngineErrorKind::Network,
                    *message,
                )),
            }
        }

        fn name(&self) -> &str {
            self.name
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn request(engine: EngineChoice) -> GenerationRequest {
        GenerationRequest {
            text: "Addition combines numbers.".to_string(),
            user_prompt: "one MCQ".to_string(),
            engine,
        }
    }

    #[tokio::test]
    async fn auto_falls_back_to_secondary_exactly_once() {
        let primary = ScriptedEngine::failing("primary", "request timed out");
        let secondary = ScriptedEngine::ok("secondary", VALID_COMPLETION);
        let orchestrator =
            GenerationOrchestrator::new(vec![
                primary.clone() as Arc<dyn CompletionEngine>,
                secondary.clone() as Arc<dyn CompletionEngine>,
            ])
            .unwrap();

        let outcome = orchestrator.generate(&request(EngineChoice::Auto)).await.unwrap();

        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(outcome.engine, "secondary");
        assert_eq!(outcome.question_set.mcqs.len(), 1);
        // The primary's failure is recorded, not raised
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(outcome.attempts[0].engine, "primary");
        assert_eq!(outcome.attempts[0].kind, EngineErrorKind::Network);
    }

    #[tokio::test]
    async fn pinned_primary_never_calls_secondary() {
        let primary = ScriptedEngine::failing("primary", "connection refused");
        let secondary = ScriptedEngine::ok("secondary", VALID_COMPLETION);
        let orchestrator =
            GenerationOrchestrator::new(vec![
                primary.clone() as Arc<dyn CompletionEngine>,
                secondary.clone() as Arc<dyn CompletionEngine>,
            ])
            .unwrap();

        let err = orchestrator
            .generate(&request(EngineChoice::Primary))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Engine { .. }));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn pinned_secondary_skips_primary() {
        let primary = ScriptedEngine::ok("primary", VALID_COMPLETION);
        let secondary = ScriptedEngine::ok("secondary", VALID_COMPLETION);
        let orchestrator =
            GenerationOrchestrator::new(vec![
                primary.clone() as Arc<dyn CompletionEngine>,
                secondary.clone() as Arc<dyn CompletionEngine>,
            ])
            .unwrap();

        let outcome = orchestrator
            .generate(&request(EngineChoice::Secondary))
            .await
            .unwrap();

        assert_eq!(primary.calls(), 0);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(outcome.engine, "secondary");
    }

    #[tokio::test]
    async fn unparseable_primary_output_triggers_fallback() {
        // A successful HTTP call with garbage output is still a failed
        // attempt, eligible for fallback under Auto
        let primary = ScriptedEngine::ok("primary", "I'm sorry, I can't produce JSON today.");
        let secondary = ScriptedEngine::ok(
            "secondary",
            // Valid JSON buried in conversational prose
            &format!("Of course! Here you go:\n{}\nHope that helps.", VALID_COMPLETION),
        );
        let orchestrator =
            GenerationOrchestrator::new(vec![
                primary.clone() as Arc<dyn CompletionEngine>,
                secondary.clone() as Arc<dyn CompletionEngine>,
            ])
            .unwrap();

        let outcome = orchestrator.generate(&request(EngineChoice::Auto)).await.unwrap();

        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(outcome.engine, "secondary");
        assert_eq!(outcome.attempts[0].kind, EngineErrorKind::Parse);
    }

    #[tokio::test]
    async fn invalid_question_set_triggers_fallback() {
        let primary = ScriptedEngine::ok(
            "primary",
            r#"{"mcqs": [{"question": "q", "options": ["A) x", "B) y"], "answer": "C) z"}], "theory": []}"#,
        );
        let secondary = ScriptedEngine::ok("secondary", VALID_COMPLETION);
        let orchestrator =
            GenerationOrchestrator::new(vec![
                primary.clone() as Arc<dyn CompletionEngine>,
                secondary.clone() as Arc<dyn CompletionEngine>,
            ])
            .unwrap();

        let outcome = orchestrator.generate(&request(EngineChoice::Auto)).await.unwrap();

        assert_eq!(outcome.attempts[0].kind, EngineErrorKind::Validation);
        assert_eq!(outcome.engine, "secondary");
    }

    #[tokio::test]
    async fn exhausted_engines_return_the_last_error() {
        let primary = ScriptedEngine::failing("primary", "status 500");
        let secondary = ScriptedEngine::failing("secondary", "status 503");
        let orchestrator =
            GenerationOrchestrator::new(vec![
                primary as Arc<dyn CompletionEngine>,
                secondary as Arc<dyn CompletionEngine>,
            ])
            .unwrap();

        let err = orchestrator.generate(&request(EngineChoice::Auto)).await.unwrap_err();

        match err {
            Error::Engine { engine, .. } => assert_eq!(engine, "secondary"),
            other => panic!("expected engine error, got {:?}", other),
        }
    }

    #[test]
    fn orchestrator_requires_at_least_one_engine() {
        assert!(GenerationOrchestrator::new(vec![]).is_err());
    }
}
