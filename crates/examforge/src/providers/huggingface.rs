//! Hugging Face Inference API client, the backup generation engine

use async_trait::async_trait;
use std::time::Duration;

use crate::config::HuggingFaceConfig;
use crate::error::{EngineErrorKind, Error, Result};
use crate::providers::engine::CompletionEngine;

const ENGINE_NAME: &str = "huggingface";

/// Hugging Face completion engine (secondary)
pub struct HuggingFaceEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_new_tokens: u32,
}

impl HuggingFaceEngine {
    /// Create a new Hugging Face engine from config with the shared request
    /// timeout
    pub fn new(config: &HuggingFaceConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            Error::Config(format!("failed to build Hugging Face HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_new_tokens: config.max_new_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

#[derive(serde::Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(serde::Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(serde::Serialize)]
struct InferenceOptions {
    use_cache: bool,
    wait_for_model: bool,
}

/// The inference API answers with either a bare generation object or a
/// one-element array of them depending on the model
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generation>),
    One(Generation),
}

#[derive(serde::Deserialize)]
struct Generation {
    generated_text: String,
}

#[async_trait]
impl CompletionEngine for HuggingFaceEngine {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = InferenceRequest {
            inputs: prompt.to_string(),
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
                return_full_text: false,
            },
            options: InferenceOptions {
                use_cache: false,
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
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

        let inference: InferenceResponse = response.json().await.map_err(|e| {
            Error::engine(
                ENGINE_NAME,
                EngineErrorKind::Empty,
                format!("response body did not decode: {}", e),
            )
        })?;

        let generated = match inference {
            InferenceResponse::Many(mut generations) => {
                if generations.is_empty() {
                    return Err(Error::engine(
                        ENGINE_NAME,
                        EngineErrorKind::Empty,
                        "no generations in response",
                    ));
                }
                generations.swap_remove(0).generated_text
            }
            InferenceResponse::One(generation) => generation.generated_text,
        };

        Ok(generated)
    }

    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}
