//! Raw HTTP client for the Gemini `generateContent` API.
//!
//! No session awareness; it only makes API calls via reqwest.

use reqwest::Client;

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Errors from LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("missing API key: {0}")]
    MissingApiKey(String),
}

impl LlmError {
    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ApiError { status, .. } => Some(*status),
            LlmError::RateLimited { .. } => Some(429),
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Raw HTTP client for the Gemini API.
#[derive(Debug)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    api_version: String,
}

impl GeminiClient {
    /// Create a client with the default base URL (https://generativelanguage.googleapis.com).
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://generativelanguage.googleapis.com".into())
    }

    /// Create a client with a custom base URL (config `base_url`, local mock servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: "v1beta".into(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, model
        )
    }

    /// Send a generateContent request for `model`.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = self.endpoint(model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(LlmError::RateLimited { retry_after });
        }

        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(LlmError::ApiError {
                status,
                message: error_message(&body),
            });
        }

        let resp: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(resp)
    }
}

/// Pull `error.message` out of a JSON error body, or return the body as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = GeminiClient::new("test-key".into());
        assert_eq!(client.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(client.api_version, "v1beta");
    }

    #[test]
    fn client_custom_base_url_trims_slash() {
        let client =
            GeminiClient::with_base_url("test-key".into(), "http://localhost:8080/".into());
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new("k".into());
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn error_message_prefers_json_message() {
        let body = r#"{"error": {"code": 400, "message": "prompt too long", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "prompt too long");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn error_display() {
        let err = LlmError::ApiError {
            status: 401,
            message: "API key not valid".into(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("API key not valid"));
        assert_eq!(err.status(), Some(401));

        let err = LlmError::RateLimited {
            retry_after: Some(30),
        };
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(err.status(), Some(429));

        let err = LlmError::MissingApiKey("GEMINI_API_KEY not set".into());
        assert!(err.to_string().contains("missing API key"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let client = GeminiClient::with_base_url("k".into(), "http://127.0.0.1:9".into());
        let req = GenerateContentRequest::prompt("hi", Default::default());
        let err = client.generate_content("m", &req).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
