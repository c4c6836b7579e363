//! Rust types for the Gemini `generateContent` REST API.
//!
//! Serde-serializable to JSON for HTTP calls. Field names follow the API's
//! camelCase; internal code stays snake_case.

use serde::{Deserialize, Serialize};

/// Default model used when the config doesn't name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Resolve model aliases to full Gemini model IDs.
pub fn resolve_model(alias: &str) -> &str {
    match alias {
        "flash" => "gemini-2.5-flash",
        "flash-lite" => "gemini-2.5-flash-lite",
        "pro" => "gemini-2.5-pro",
        _ => alias, // pass through full model IDs
    }
}

/// Per-call sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

impl GenerationConfig {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Disable extended reasoning (thinking budget 0).
    pub fn without_thinking(mut self) -> Self {
        self.thinking_config = Some(ThinkingConfig { thinking_budget: 0 });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// A single-turn user prompt.
    pub fn prompt(text: &str, config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content::user(text)],
            generation_config: config,
        }
    }
}

/// One turn of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".into()),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response from `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage from the API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Error envelope returned with 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_model_aliases() {
        assert_eq!(resolve_model("flash"), "gemini-2.5-flash");
        assert_eq!(resolve_model("pro"), "gemini-2.5-pro");
        assert_eq!(resolve_model("flash-lite"), "gemini-2.5-flash-lite");
    }

    #[test]
    fn resolve_model_passthrough() {
        assert_eq!(resolve_model("gemini-2.0-flash"), "gemini-2.0-flash");
        assert_eq!(resolve_model(DEFAULT_MODEL), DEFAULT_MODEL);
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let config = GenerationConfig::with_temperature(0.7)
            .top_p(0.95)
            .without_thinking();
        let req = GenerateContentRequest::prompt("Build a site", config);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Build a site");
        let gen = &json["generationConfig"];
        // f32 precision: 0.7f32 round-trips through JSON as ~0.699999988
        assert!((gen["temperature"].as_f64().unwrap() - 0.7).abs() < 0.001);
        assert!((gen["topP"].as_f64().unwrap() - 0.95).abs() < 0.001);
        assert_eq!(gen["thinkingConfig"]["thinkingBudget"], 0);
    }

    #[test]
    fn unset_sampling_fields_are_skipped() {
        let req = GenerateContentRequest::prompt("x", GenerationConfig::with_temperature(0.5));
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"temperature\":0.5"));
        assert!(!json.contains("topP"));
        assert!(!json.contains("thinkingConfig"));
    }

    #[test]
    fn response_deserializes_from_json() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "<!DOCTYPE html>"}, {"text": "<html></html>"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 40, "totalTokenCount": 160},
            "modelVersion": "gemini-2.5-flash"
        }"#;

        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text().as_deref(), Some("<!DOCTYPE html><html></html>"));
        assert_eq!(resp.finish_reason(), Some("STOP"));
        let usage = resp.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 120);
        assert_eq!(usage.total_token_count, 160);
    }

    #[test]
    fn blocked_response_has_no_text() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(resp.text().is_none());

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn error_envelope_deserializes() {
        let json = r#"{"error": {"code": 400, "message": "Request payload size exceeds the limit", "status": "INVALID_ARGUMENT"}}"#;
        let env: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.error.code, 400);
        assert_eq!(env.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }
}
