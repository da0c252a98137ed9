//! Configuration loading, validation, and management for admitdesk.
//!
//! Loads configuration from a TOML file with environment variable overrides
//! for the API key and model. Validates all settings at load time so a bad
//! value fails startup, not the first query.

use admitdesk_core::gateway::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion service API key (usually supplied via environment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Completion model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Generation parameters forwarded to the completion service
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Gateway behavior
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// The persona/instruction block prepended to every generated prompt
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Context assembly limits
    #[serde(default)]
    pub context: ContextConfig,

    /// Knowledge document locations
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Session lifecycle settings
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_persona() -> String {
    DEFAULT_PERSONA.into()
}

/// The default admission-counselor persona. Deployments normally override
/// this in their config file; the default keeps the orchestrator usable out
/// of the box.
pub const DEFAULT_PERSONA: &str = "\
You are an admission counselor assistant for a technical university. Your \
mission is to give prospective students and their families accurate, helpful, \
and encouraging guidance about admissions.

Principles:
1. Only state facts you can support from the provided knowledge base.
2. Offer step-by-step guidance and practical advice.
3. Be patient and supportive; admission queries can be stressful.
4. Use simple, clear language that students and parents understand.
5. When information is missing from the knowledge base, say so and point to \
official sources instead of guessing.

Stay focused on admission-related topics: programs, eligibility, fees, \
deadlines, campus facilities, placements, and contact details. For anything \
else, politely redirect to the relevant department.";

/// Gateway call behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Upper bound on a single completion call, in seconds. A call that
    /// exceeds this is treated like any other gateway failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Context assembly limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Cap on the assembled context block, in characters. Bounds the prompt
    /// sent downstream; trailing blocks past the cap are dropped whole.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_chars() -> usize {
    4000
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

/// Where to look for knowledge documents. Both paths are optional; when
/// neither resolves, the built-in fallback knowledge set is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Fully organized document (categories + FAQ + quick responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organized_path: Option<PathBuf>,

    /// Raw structured extract, promoted to the organized shape at load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_path: Option<PathBuf>,
}

/// Session lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Conversation turns retained per session (oldest evicted first)
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Idle minutes before a session is swept
    #[serde(default = "default_max_idle_minutes")]
    pub max_idle_minutes: u64,

    /// How often the sweeper wakes up, in seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_max_turns() -> usize {
    10
}
fn default_max_idle_minutes() -> u64 {
    30
}
fn default_sweep_interval_secs() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            max_idle_minutes: default_max_idle_minutes(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("gateway", &self.gateway)
            .field("persona", &format_args!("<{} chars>", self.persona.len()))
            .field("context", &self.context)
            .field("knowledge", &self.knowledge)
            .field("session", &self.session)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl AppConfig {
    /// Load configuration from a file path, then apply environment overrides.
    ///
    /// Environment variables:
    /// - `ADMITDESK_API_KEY` (highest priority), then `GEMINI_API_KEY`
    /// - `ADMITDESK_MODEL` overrides the configured model
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("ADMITDESK_API_KEY")
                .ok()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("ADMITDESK_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.temperature < 0.0 || self.generation.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.generation.top_p < 0.0 || self.generation.top_p > 1.0 {
            return Err(ConfigError::ValidationError(
                "generation.top_p must be between 0.0 and 1.0".into(),
            ));
        }
        if self.context.max_chars == 0 {
            return Err(ConfigError::ValidationError(
                "context.max_chars must be greater than zero".into(),
            ));
        }
        if self.session.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "session.max_turns must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Check whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            generation: GenerationConfig::default(),
            gateway: GatewayConfig::default(),
            persona: default_persona(),
            context: ContextConfig::default(),
            knowledge: KnowledgeConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(config.context.max_chars, 4000);
        assert_eq!(config.session.max_turns, 10);
        assert_eq!(config.session.max_idle_minutes, 30);
        assert!(!config.persona.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
            model = "gemini-1.5-pro"

            [generation]
            temperature = 0.3

            [session]
            max_idle_minutes = 10
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert!((config.generation.temperature - 0.3).abs() < f32::EPSILON);
        // Unspecified fields keep their defaults
        assert_eq!(config.generation.top_k, 40);
        assert_eq!(config.session.max_idle_minutes, 10);
        assert_eq!(config.session.max_turns, 10);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/admitdesk.toml")).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("admitdesk.toml");
        fs::write(
            &path,
            r#"
                api_key = "test-key"
                model = "gemini-2.0-flash"

                [context]
                max_chars = 2500
            "#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.context.max_chars, 2500);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let toml_str = r#"
            [generation]
            temperature = 3.5
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn zero_context_cap_rejected() {
        let toml_str = r#"
            [context]
            max_chars = 0
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("super-secret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
