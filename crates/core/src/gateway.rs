//! CompletionGateway trait — the abstraction over the text completion service.
//!
//! A gateway knows how to send a fully assembled prompt to a generative AI
//! backend and return the completion text. The call is network-bound, may
//! fail for any reason (quota, network, content-safety rejection), and the
//! core treats every failure uniformly: it never surfaces the raw error to
//! the end user.
//!
//! Implementations: Gemini HTTP client, timeout/fallback chain, test stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Generation parameters forwarded verbatim to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Temperature (0.0 = deterministic, higher = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_top_p() -> f32 {
    0.8
}
fn default_top_k() -> u32 {
    40
}
fn default_max_output_tokens() -> u32 {
    1000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Content categories the completion service can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

/// Blocking threshold for a harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// A single safety rule: block content in `category` at `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: SafetyThreshold,
}

impl SafetySetting {
    /// The default safety posture: block medium-and-above in every category.
    pub fn default_set() -> Vec<SafetySetting> {
        use HarmCategory::*;
        [
            HarmCategoryHarassment,
            HarmCategoryHateSpeech,
            HarmCategorySexuallyExplicit,
            HarmCategoryDangerousContent,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: SafetyThreshold::BlockMediumAndAbove,
        })
        .collect()
    }
}

/// A complete request to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The fully assembled prompt (persona + context + question)
    pub prompt: String,

    /// Generation parameters
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Safety thresholds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub safety: Vec<SafetySetting>,
}

impl CompletionRequest {
    /// Build a request with default generation parameters and safety set.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            generation: GenerationConfig::default(),
            safety: SafetySetting::default_set(),
        }
    }

    /// Override the generation parameters.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Override the safety settings.
    pub fn with_safety(mut self, safety: Vec<SafetySetting>) -> Self {
        self.safety = safety;
        self
    }
}

/// The completion service boundary.
///
/// Every backend (Gemini, a fallback chain, a test stub) implements this
/// trait. The orchestrator calls `complete()` without knowing which backend
/// is in use.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// A human-readable name for this gateway (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a prompt and get the completion text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, GatewayError>;

    /// Health check — can we reach the service?
    async fn health_check(&self) -> std::result::Result<bool, GatewayError> {
        Ok(true)
    }
}
