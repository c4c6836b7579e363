//! Generation client: the three model calls behind the UI.
//!
//! Each call renders its template, makes one attempt through a
//! `ContentModel`, and sanitizes the reply. No retry, no streaming, no cache.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::catalog::resolve_language;
use crate::llm::client::LlmError;
use crate::llm::types::{GenerationConfig, ThinkingConfig};
use crate::llm::ContentModel;
use crate::prompts::{self, sanitize};

/// Website generation: creative but on-brief, reasoning disabled.
pub const WEBSITE_SAMPLING: GenerationConfig = GenerationConfig {
    temperature: Some(0.7),
    top_p: Some(0.95),
    thinking_config: Some(ThinkingConfig { thinking_budget: 0 }),
};

pub const NEWSLETTER_SAMPLING: GenerationConfig = GenerationConfig {
    temperature: Some(0.8),
    top_p: Some(0.95),
    thinking_config: None,
};

pub const ANALYSIS_SAMPLING: GenerationConfig = GenerationConfig {
    temperature: Some(0.5),
    top_p: None,
    thinking_config: None,
};

/// Everything the website prompt needs. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebsiteRequest {
    pub description: String,
    pub user_name: String,
    pub business_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub palette_name: String,
    pub palette_details: String,
    pub modification: Option<String>,
}

/// Errors surfaced to the user from a generation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("The generated prompt is too large. Please try a shorter description.")]
    PromptTooLarge,

    #[error("Gemini API error: {0}")]
    Api(String),

    #[error("the model returned no text")]
    EmptyResponse,

    #[error("request cancelled")]
    Cancelled,
}

impl GenerationError {
    fn from_llm(err: LlmError) -> Self {
        GenerationError::Api(err.to_string())
    }

    /// Website calls remap a 400 to a user-facing "prompt too large".
    fn from_llm_website(err: LlmError) -> Self {
        match err.status() {
            Some(400) => GenerationError::PromptTooLarge,
            _ => Self::from_llm(err),
        }
    }
}

/// Issues prompts to the hosted model. Cheap to clone.
#[derive(Clone)]
pub struct SiteGenerator {
    model: Arc<dyn ContentModel>,
}

impl SiteGenerator {
    pub fn new(model: Arc<dyn ContentModel>) -> Self {
        Self { model }
    }

    /// Generate (or modify) a full HTML site. The reply is sanitized but not
    /// validated; acceptance is the session's call.
    pub async fn generate_website(&self, req: &WebsiteRequest) -> Result<String, GenerationError> {
        let prompt = prompts::build_website_prompt(req);
        debug!(
            business = %req.business_name,
            palette = %req.palette_name,
            modification = req.modification.is_some(),
            prompt_len = prompt.len(),
            "generating website"
        );

        let text = self
            .model
            .generate(&prompt, WEBSITE_SAMPLING)
            .await
            .map_err(|e| {
                warn!("website generation failed: {e}");
                GenerationError::from_llm_website(e)
            })?
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(sanitize(&text))
    }

    /// `generate_website` raced against a cancellation token.
    pub async fn generate_website_cancellable(
        &self,
        req: &WebsiteRequest,
        cancel: &CancellationToken,
    ) -> Result<String, GenerationError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("website generation cancelled");
                Err(GenerationError::Cancelled)
            }
            result = self.generate_website(req) => result,
        }
    }

    /// Short promotional text for sharing in chat apps.
    pub async fn generate_newsletter(
        &self,
        description: &str,
        business_name: &str,
    ) -> Result<String, GenerationError> {
        let prompt = prompts::build_newsletter_prompt(description, business_name);
        debug!(business = %business_name, "generating newsletter");

        let text = self
            .model
            .generate(&prompt, NEWSLETTER_SAMPLING)
            .await
            .map_err(|e| {
                warn!("newsletter generation failed: {e}");
                GenerationError::from_llm(e)
            })?
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(sanitize(&text))
    }

    /// Summarize a dashboard snapshot entirely in the language `language_code`
    /// names. Unknown codes fall back to the first supported language.
    pub async fn analyze_dashboard(
        &self,
        snapshot: &str,
        language_code: &str,
    ) -> Result<String, GenerationError> {
        let language = resolve_language(language_code);
        let prompt = prompts::build_dashboard_prompt(snapshot, language);
        debug!(language = language.code, "analyzing dashboard");

        let text = self
            .model
            .generate(&prompt, ANALYSIS_SAMPLING)
            .await
            .map_err(|e| {
                warn!("dashboard analysis failed: {e}");
                GenerationError::from_llm(e)
            })?
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(sanitize(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{Reply, ScriptedModel};

    fn request() -> WebsiteRequest {
        WebsiteRequest {
            description: "We sell cakes".into(),
            user_name: "Ana".into(),
            business_name: "Ana's Bakery".into(),
            user_email: "a@b.com".into(),
            user_phone: "555".into(),
            palette_name: "Modern".into(),
            palette_details: "Primary: Indigo".into(),
            modification: None,
        }
    }

    #[tokio::test]
    async fn website_reply_is_sanitized() {
        let model = Arc::new(ScriptedModel::text("```html\n<!DOCTYPE html><html></html>\n```"));
        let gen = SiteGenerator::new(model.clone());

        let html = gen.generate_website(&request()).await.unwrap();
        assert_eq!(html, "<!DOCTYPE html><html></html>");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, WEBSITE_SAMPLING);
        assert!(calls[0].0.contains("Ana's Bakery"));
    }

    #[tokio::test]
    async fn website_sampling_disables_thinking() {
        assert_eq!(WEBSITE_SAMPLING.temperature, Some(0.7));
        assert_eq!(WEBSITE_SAMPLING.top_p, Some(0.95));
        assert_eq!(
            WEBSITE_SAMPLING.thinking_config,
            Some(ThinkingConfig { thinking_budget: 0 })
        );
    }

    #[tokio::test]
    async fn status_400_is_prompt_too_large() {
        let model = Arc::new(ScriptedModel::new(vec![Reply::Status(400, "payload too big")]));
        let gen = SiteGenerator::new(model);

        let err = gen.generate_website(&request()).await.unwrap_err();
        assert_eq!(err, GenerationError::PromptTooLarge);
        assert!(err.to_string().contains("shorter description"));
    }

    #[tokio::test]
    async fn other_statuses_wrap_message() {
        let model = Arc::new(ScriptedModel::new(vec![Reply::Status(503, "overloaded")]));
        let gen = SiteGenerator::new(model);

        let err = gen.generate_website(&request()).await.unwrap_err();
        match err {
            GenerationError::Api(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn newsletter_400_is_not_remapped() {
        let model = Arc::new(ScriptedModel::new(vec![Reply::Status(400, "bad")]));
        let gen = SiteGenerator::new(model);

        let err = gen.generate_newsletter("cakes", "Ana's Bakery").await.unwrap_err();
        assert!(matches!(err, GenerationError::Api(_)));
    }

    #[tokio::test]
    async fn empty_reply_is_error() {
        let model = Arc::new(ScriptedModel::new(vec![Reply::Empty]));
        let gen = SiteGenerator::new(model);
        let err = gen.generate_website(&request()).await.unwrap_err();
        assert_eq!(err, GenerationError::EmptyResponse);
    }

    #[tokio::test]
    async fn newsletter_uses_its_sampling() {
        let model = Arc::new(ScriptedModel::text("  🚀 Big news! Ana's Bakery is online!  "));
        let gen = SiteGenerator::new(model.clone());

        let text = gen.generate_newsletter("We sell cakes", "Ana's Bakery").await.unwrap();
        assert_eq!(text, "🚀 Big news! Ana's Bakery is online!");
        assert_eq!(model.calls()[0].1, NEWSLETTER_SAMPLING);
        assert!(model.last_prompt().contains("We sell cakes"));
    }

    #[tokio::test]
    async fn analysis_resolves_language() {
        let model = Arc::new(ScriptedModel::text("नमस्ते"));
        let gen = SiteGenerator::new(model.clone());

        let text = gen.analyze_dashboard("- Visitors: 1,234", "hi-IN").await.unwrap();
        assert_eq!(text, "नमस्ते");
        assert!(model.last_prompt().contains("Language Code: hi-IN"));
        assert_eq!(model.calls()[0].1, ANALYSIS_SAMPLING);
    }

    #[tokio::test]
    async fn analysis_unknown_language_falls_back() {
        let model = Arc::new(ScriptedModel::text("Hello"));
        let gen = SiteGenerator::new(model.clone());

        gen.analyze_dashboard("- Visitors: 1", "xx-YY").await.unwrap();
        assert!(model.last_prompt().contains("Language Code: en-US"));
        assert!(model.last_prompt().contains("Language Name: English"));
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let model = Arc::new(ScriptedModel::text("<!DOCTYPE html>"));
        let gen = SiteGenerator::new(model.clone());
        let token = CancellationToken::new();
        token.cancel();

        let err = gen
            .generate_website_cancellable(&request(), &token)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Cancelled);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn live_token_lets_call_finish() {
        let model = Arc::new(ScriptedModel::text("<!DOCTYPE html>"));
        let gen = SiteGenerator::new(model);
        let token = CancellationToken::new();

        let html = gen
            .generate_website_cancellable(&request(), &token)
            .await
            .unwrap();
        assert_eq!(html, "<!DOCTYPE html>");
    }
}
