//! LLM Pool: model routing and connection management for the Gemini API.
//!
//! Wraps GeminiClient with model aliasing and default model selection.
//! `ContentModel` is the seam the generator talks through, so tests can
//! script replies without a network.

pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use client::{GeminiClient, LlmError};
use types::{resolve_model, GenerateContentRequest, GenerationConfig};

/// Environment variables checked for the API key, in order, when the
/// configured variable is unset.
pub const FALLBACK_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Anything that can turn a prompt into text.
#[async_trait]
pub trait ContentModel: Send + Sync {
    /// Single-attempt completion. `Ok(None)` means the model answered with no text.
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<Option<String>, LlmError>;
}

/// LLM connection pool with model routing.
#[derive(Debug)]
pub struct LlmPool {
    client: GeminiClient,
    default_model: String,
}

impl LlmPool {
    /// Create a pool with an explicit API key and default model.
    pub fn new(api_key: String, default_model: &str) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            default_model: resolve_model(default_model).to_string(),
        }
    }

    /// Create a pool reading the API key from `key_var`, then the fallbacks.
    pub fn from_env(key_var: &str, default_model: &str) -> Result<Self, LlmError> {
        let api_key = read_api_key(key_var)?;
        Ok(Self::new(api_key, default_model))
    }

    /// Create a pool against a custom endpoint (config `base_url`, local mocks).
    pub fn with_base_url(api_key: String, default_model: &str, base_url: String) -> Self {
        Self {
            client: GeminiClient::with_base_url(api_key, base_url),
            default_model: resolve_model(default_model).to_string(),
        }
    }

    /// Send a single-turn prompt.
    ///
    /// - `model`: None means use default model, Some("alias") resolves aliases.
    pub async fn complete(
        &self,
        model: Option<&str>,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<Option<String>, LlmError> {
        let resolved_model = model
            .map(|m| resolve_model(m).to_string())
            .unwrap_or_else(|| self.default_model.clone());

        let request = GenerateContentRequest::prompt(prompt, config);
        let response = self.client.generate_content(&resolved_model, &request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                model = %resolved_model,
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                finish = response.finish_reason().unwrap_or("unknown"),
                "generateContent finished"
            );
        }

        Ok(response.text())
    }

    /// Change the default model at runtime.
    pub fn set_default_model(&mut self, alias: &str) {
        self.default_model = resolve_model(alias).to_string();
    }

    /// Get the default model (resolved to full ID).
    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[async_trait]
impl ContentModel for LlmPool {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<Option<String>, LlmError> {
        self.complete(None, prompt, config).await
    }
}

/// Read the API key from `key_var`, falling back to `FALLBACK_KEY_VARS`.
pub fn read_api_key(key_var: &str) -> Result<String, LlmError> {
    std::iter::once(key_var)
        .chain(FALLBACK_KEY_VARS.iter().copied())
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            LlmError::MissingApiKey(format!("{key_var} environment variable not set"))
        })
}
