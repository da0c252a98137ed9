//! Error types for the admitdesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Construction-time
//! failures get a dedicated `InitError` so a caller can statically tell
//! "the orchestrator could not be built" apart from "this one query failed".

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all admitdesk operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Completion service errors ---
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    // --- Knowledge base errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures from the external completion service.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by completion service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Content blocked by safety filter: {0}")]
    SafetyBlocked(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Gateway not configured: {0}")]
    NotConfigured(String),
}

/// Failures while loading or parsing the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge document {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse knowledge document {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("All knowledge sources failed")]
    Exhausted,
}

/// Startup failures. Fatal to orchestrator construction — a value of this
/// type means no request can be served until the underlying problem is fixed.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Knowledge base unavailable: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Completion service credentials missing: {0}")]
    MissingCredentials(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_displays_correctly() {
        let err = Error::Gateway(GatewayError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn knowledge_error_displays_path() {
        let err = Error::Knowledge(KnowledgeError::Parse {
            path: PathBuf::from("/data/organized_data.json"),
            reason: "unexpected end of input".into(),
        });
        assert!(err.to_string().contains("organized_data.json"));
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn init_error_is_distinct_from_query_error() {
        let init = InitError::MissingCredentials("no API key in config or environment".into());
        assert!(init.to_string().contains("credentials"));

        // A knowledge failure at startup wraps into InitError, not Error.
        let init: InitError = KnowledgeError::Exhausted.into();
        assert!(matches!(init, InitError::Knowledge(_)));
    }
}
