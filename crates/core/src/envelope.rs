//! The uniform response contract returned for every processed query.
//!
//! Whatever path a query takes — canned template, AI generation, fallback,
//! or internal fault — the caller always receives a well-formed
//! `ResponseEnvelope`. The `kind` and `confidence` fields tell the embedding
//! layer how the answer was produced; `sources` carries provenance tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Answered from a canned template without touching the completion service
    Quick,
    /// Generated by the completion service from an assembled grounding prompt
    AiGenerated,
    /// The completion service failed; the configured fallback template was used
    Fallback,
    /// An unexpected internal fault was caught at the orchestrator boundary
    Error,
}

impl std::fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Quick => "quick",
            Self::AiGenerated => "ai_generated",
            Self::Fallback => "fallback",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// The response returned for every processed query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The canonical response text
    pub response: String,

    /// Equivalent alternative phrasings, when the template has variants
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,

    /// How this response was produced
    pub kind: ResponseKind,

    /// Confidence in [0, 1]
    pub confidence: f32,

    /// Provenance tags (e.g. "quick_responses", "completion_service")
    pub sources: Vec<String>,

    /// When the response was produced
    pub timestamp: DateTime<Utc>,

    /// Generated query identifier, stamped by the orchestrator
    #[serde(default)]
    pub query_id: String,

    /// Caller-supplied or generated session identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Seconds elapsed since the session was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_duration_secs: Option<u64>,

    /// Underlying failure description — for logging, never for end users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    fn base(response: impl Into<String>, kind: ResponseKind, confidence: f32) -> Self {
        Self {
            response: response.into(),
            alternatives: Vec::new(),
            kind,
            confidence,
            sources: Vec::new(),
            timestamp: Utc::now(),
            query_id: String::new(),
            session_id: None,
            session_duration_secs: None,
            error: None,
        }
    }

    /// A quick-response answer (canned template hit).
    pub fn quick(response: impl Into<String>) -> Self {
        let mut env = Self::base(response, ResponseKind::Quick, 0.9);
        env.sources = vec!["quick_responses".into()];
        env
    }

    /// A successful AI-generated answer.
    pub fn ai_generated(response: impl Into<String>) -> Self {
        let mut env = Self::base(response, ResponseKind::AiGenerated, 0.8);
        env.sources = vec!["completion_service".into(), "admission_data".into()];
        env
    }

    /// The completion service failed; the fallback template stands in.
    pub fn fallback(response: impl Into<String>, cause: impl Into<String>) -> Self {
        let mut env = Self::base(response, ResponseKind::Fallback, 0.1);
        env.sources = vec!["fallback".into()];
        env.error = Some(cause.into());
        env
    }

    /// An unexpected internal fault, converted at the orchestrator boundary.
    pub fn internal_error(response: impl Into<String>, cause: impl Into<String>) -> Self {
        let mut env = Self::base(response, ResponseKind::Error, 0.0);
        env.sources = vec!["error_handler".into()];
        env.error = Some(cause.into());
        env
    }

    /// Attach alternative template variants.
    pub fn with_alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }
}
