//! Gemini gateway implementation.
//!
//! Uses the Google Generative Language API (`generateContent`, non-streaming).
//!
//! Features:
//! - API-key authentication via the `key` query parameter
//! - Generation parameters mapped to `generationConfig`
//! - Safety thresholds forwarded as `safetySettings`
//! - Prompt-feedback and candidate-level safety blocks surfaced as
//!   `GatewayError::SafetyBlocked`

use admitdesk_core::error::GatewayError;
use admitdesk_core::gateway::{CompletionGateway, CompletionRequest};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Generative Language API gateway.
pub struct GeminiGateway {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiGateway {
    /// Create a new Gemini gateway.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body for a completion call.
    fn build_body(request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": request.prompt}]
            }],
            "generationConfig": {
                "temperature": request.generation.temperature,
                "topP": request.generation.top_p,
                "topK": request.generation.top_k,
                "maxOutputTokens": request.generation.max_output_tokens,
            },
        });

        if !request.safety.is_empty() {
            body["safetySettings"] = serde_json::json!(request.safety);
        }

        body
    }

    /// Extract the completion text from an API response.
    fn extract_text(resp: GenerateContentResponse) -> Result<String, GatewayError> {
        if let Some(feedback) = &resp.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(GatewayError::SafetyBlocked(format!(
                    "prompt blocked: {reason}"
                )));
            }
        }

        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::ApiError {
                status_code: 200,
                message: "Response contained no candidates".into(),
            })?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(GatewayError::SafetyBlocked(
                "candidate blocked by safety filter".into(),
            ));
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::ApiError {
                status_code: 200,
                message: "Response contained no text".into(),
            });
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl CompletionGateway for GeminiGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let body = Self::build_body(&request);

        debug!(gateway = "gemini", model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(GatewayError::RateLimited {
                retry_after_secs: 5,
            });
        }
        if status == 401 || status == 403 {
            return Err(GatewayError::AuthenticationFailed(
                "Invalid Gemini API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(GatewayError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GenerateContentResponse =
            response.json().await.map_err(|e| GatewayError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Gemini response: {e}"),
            })?;

        Self::extract_text(api_resp)
    }

    async fn health_check(&self) -> Result<bool, GatewayError> {
        let request = CompletionRequest::new("hi");
        let mut body = Self::build_body(&request);
        body["generationConfig"]["maxOutputTokens"] = serde_json::json!(1);

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        // 200 = works, 401/403 = bad key, anything else = reachable but error
        let status = response.status().as_u16();
        Ok(response.status().is_success() || (status != 401 && status != 403))
    }
}

// --- Gemini API types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
