//! Gemini client for question generation via the Generative Language API

use async_trait::async_trait;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{EngineErrorKind, Error, Result};
use crate::providers::engine::CompletionEngine;

const ENGINE_NAME: &str = "gemini";

/// Gemini completion engine (primary)
pub struct GeminiEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiEngine {
    /// Create a new Gemini engine from config with the shared request timeout
    pub fn new(config: &GeminiConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build Gemini HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Get the generateContent endpoint URL
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(serde::Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: String,
}

#[async_trait]
impl CompletionEngine for GeminiEngine {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        // The API key travels in a header, never in the URL, so it cannot
        // end up in error messages or logs
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("request failed: {}", e)
                };
                Error::engine(ENGINE_NAME, EngineErrorKind::Network, message)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::engine(
                ENGINE_NAME,
                EngineErrorKind::Status,
                format!("non-success response status {}", status),
            ));
        }

        let gen_response: GenerateResponse = response.json().await.map_err(|e| {
            Error::engine(
                ENGINE_NAME,
                EngineErrorKind::Empty,
                format!("response body did not decode: {}", e),
            )
        })?;

        gen_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                Error::engine(
                    ENGINE_NAME,
                    EngineErrorKind::Empty,
                    "no generated content in response",
                )
            })
    }

    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}
