//! The chatbot orchestrator.
//!
//! Per incoming `(session id, raw query)`:
//!
//! 1. Touch the session (creates it if absent, bumps counters)
//! 2. Short-circuit empty input before normalization
//! 3. Normalize, then try the quick-response matcher
//! 4. On a miss: assemble context, build the prompt, call the gateway with a
//!    caller-imposed timeout
//! 5. Gateway failure is recovered locally with the fallback template; the
//!    raw cause goes to the envelope's error field for logging only
//! 6. Record the turn, stamp the envelope, return
//!
//! No error escapes `process_query` — an unexpected internal fault becomes a
//! `ResponseKind::Error` envelope at this boundary. Construction failures
//! are a different species (`InitError`) and do prevent serving.

use admitdesk_config::AppConfig;
use admitdesk_core::envelope::ResponseEnvelope;
use admitdesk_core::error::{Error, GatewayError, InitError};
use admitdesk_core::gateway::{
    CompletionGateway, CompletionRequest, GenerationConfig, SafetySetting,
};
use admitdesk_core::knowledge::QuickResponse;
use admitdesk_knowledge::{KnowledgeLoader, KnowledgeStore};
use admitdesk_pipeline::{ContextAssembler, PromptBuilder, QueryNormalizer, QuickResponseMatcher};
use admitdesk_providers::GeminiGateway;
use admitdesk_session::{ConversationTurn, SessionLedger, SessionStats, spawn_sweeper};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Returned when the query is empty or whitespace-only.
const EMPTY_QUERY_RESPONSE: &str = "Please ask a question about admissions, for example about \
     courses, eligibility, fees, or important dates.";

/// Returned when the store carries no fallback template of its own.
const DEFAULT_FALLBACK: &str =
    "I'm sorry, I'm having trouble processing your request right now. Please try again later.";

/// Returned for unexpected internal faults.
const ERROR_RESPONSE: &str = "I apologize, but I'm experiencing some technical difficulties. \
     Please try again in a moment or contact the admission office directly.";

/// Usage statistics across the ledger and the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub sessions: SessionStats,
    pub knowledge_categories: usize,
    pub knowledge_faqs: usize,
}

/// Owns all dependent components and serves `process_query`.
pub struct Orchestrator {
    store: Arc<KnowledgeStore>,
    normalizer: QueryNormalizer,
    matcher: QuickResponseMatcher,
    assembler: ContextAssembler,
    prompts: PromptBuilder,
    gateway: Arc<dyn CompletionGateway>,
    ledger: Arc<SessionLedger>,
    generation: GenerationConfig,
    safety: Vec<SafetySetting>,
    gateway_timeout: Duration,
    sweep_interval: Duration,
    max_idle_minutes: u64,
    query_seq: AtomicU64,
}

impl Orchestrator {
    /// Build an orchestrator with an injected gateway, loading knowledge via
    /// the configured loader chain.
    pub fn new(
        config: &AppConfig,
        gateway: Arc<dyn CompletionGateway>,
    ) -> Result<Self, InitError> {
        let loader = KnowledgeLoader::standard(
            config.knowledge.organized_path.as_deref(),
            config.knowledge.structured_path.as_deref(),
        );
        let (store, source) = loader.load()?;
        info!(
            source,
            categories = store.category_count(),
            faqs = store.faq_count(),
            "Orchestrator knowledge loaded"
        );
        Ok(Self::with_store(store, gateway, config))
    }

    /// Build an orchestrator end-to-end from configuration, including the
    /// Gemini gateway. Fails fast when credentials are absent.
    pub fn from_config(config: &AppConfig) -> Result<Self, InitError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            InitError::MissingCredentials(
                "set api_key in the config file or the ADMITDESK_API_KEY / GEMINI_API_KEY \
                 environment variables"
                    .into(),
            )
        })?;
        let gateway = Arc::new(GeminiGateway::new(api_key, &config.model));
        Self::new(config, gateway)
    }

    /// Build an orchestrator around an already-constructed store. Infallible;
    /// used by embedders that manage knowledge themselves, and by tests.
    pub fn with_store(
        store: KnowledgeStore,
        gateway: Arc<dyn CompletionGateway>,
        config: &AppConfig,
    ) -> Self {
        let store = Arc::new(store);
        let ledger = Arc::new(SessionLedger::new().with_max_turns(config.session.max_turns));

        Self {
            normalizer: QueryNormalizer::new(),
            matcher: QuickResponseMatcher::new(store.clone()),
            assembler: ContextAssembler::new(store.clone(), config.context.max_chars),
            prompts: PromptBuilder::new(&config.persona),
            gateway,
            ledger,
            generation: config.generation.clone(),
            safety: SafetySetting::default_set(),
            gateway_timeout: Duration::from_secs(config.gateway.timeout_secs),
            sweep_interval: Duration::from_secs(config.session.sweep_interval_secs),
            max_idle_minutes: config.session.max_idle_minutes,
            query_seq: AtomicU64::new(0),
            store,
        }
    }

    /// Process one query. This is the sole inbound entry point; it always
    /// returns a well-formed envelope.
    pub async fn process_query(
        &self,
        raw_query: &str,
        session_id: Option<&str>,
    ) -> ResponseEnvelope {
        let session = session_id
            .map(str::to_string)
            .unwrap_or_else(|| format!("session_{}", Uuid::new_v4().simple()));
        let seq = self.query_seq.fetch_add(1, Ordering::Relaxed) + 1;

        let mut envelope = match self.handle(raw_query, &session).await {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(error = %e, session = %session, "Unexpected fault while processing query");
                ResponseEnvelope::internal_error(ERROR_RESPONSE, e.to_string())
            }
        };

        self.ledger.record_turn(&session, raw_query, &envelope.response);

        let uniq = Uuid::new_v4().simple().to_string();
        envelope.query_id = format!("q_{}_{}", seq, &uniq[..8]);
        envelope.session_duration_secs = self.ledger.session_duration_secs(&session);
        envelope.session_id = Some(session);
        envelope
    }

    async fn handle(&self, raw_query: &str, session: &str) -> Result<ResponseEnvelope, Error> {
        self.ledger.touch(session);

        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            debug!(session, "Empty query short-circuited");
            let mut envelope = ResponseEnvelope::fallback(EMPTY_QUERY_RESPONSE, "empty query");
            envelope.sources = vec!["input_validation".into()];
            return Ok(envelope);
        }

        info!(session, chars = trimmed.len(), "Processing query");
        let normalized = self.normalizer.normalize(trimmed);

        if let Some(hit) = self.matcher.match_query(&normalized) {
            debug!(session, key = %hit.key, score = hit.score, "Quick response path");
            return Ok(ResponseEnvelope::quick(hit.text).with_alternatives(hit.alternatives));
        }

        let context = self.assembler.assemble(&normalized);
        let prompt = self.prompts.build(trimmed, &context);
        let request = CompletionRequest {
            prompt,
            generation: self.generation.clone(),
            safety: self.safety.clone(),
        };

        let result = match tokio::time::timeout(
            self.gateway_timeout,
            self.gateway.complete(request),
        )
        .await
        {
            Ok(inner) => inner,
            Err(_) => Err(GatewayError::Timeout(format!(
                "Gateway '{}' exceeded the {}s bound",
                self.gateway.name(),
                self.gateway_timeout.as_secs()
            ))),
        };

        match result {
            Ok(text) => {
                debug!(session, chars = text.len(), "AI generation path succeeded");
                Ok(ResponseEnvelope::ai_generated(text))
            }
            Err(e) => {
                warn!(session, error = %e, "Completion service failed, using fallback template");
                Ok(ResponseEnvelope::fallback(self.fallback_text(), e.to_string()))
            }
        }
    }

    fn fallback_text(&self) -> String {
        self.store
            .quick_responses()
            .fallback()
            .and_then(QuickResponse::text)
            .unwrap_or(DEFAULT_FALLBACK)
            .to_string()
    }

    /// Start the periodic idle-session sweeper with the configured interval
    /// and threshold. Independent of request handling; abort the handle on
    /// shutdown.
    pub fn start_sweeper(&self) -> tokio::task::JoinHandle<()> {
        spawn_sweeper(
            self.ledger.clone(),
            self.sweep_interval,
            self.max_idle_minutes,
        )
    }

    /// The conversation history of one session.
    pub fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.ledger.history(session_id)
    }

    /// Drop one session's bookkeeping entirely (conversation reset).
    pub fn reset_session(&self, session_id: &str) -> bool {
        self.ledger.remove(session_id)
    }

    /// Usage statistics.
    pub fn statistics(&self) -> EngineStats {
        EngineStats {
            sessions: self.ledger.stats(),
            knowledge_categories: self.store.category_count(),
            knowledge_faqs: self.store.faq_count(),
        }
    }

    /// The session ledger, for embedders that expose it directly.
    pub fn ledger(&self) -> &Arc<SessionLedger> {
        &self.ledger
    }
}
