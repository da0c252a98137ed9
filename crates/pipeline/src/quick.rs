//! Quick-response matching.
//!
//! Greeting check first, then score-based category matching. Scoring is
//! substring counting over the normalized text: a category scores one point
//! per keyword that occurs verbatim anywhere in the text, so multi-word
//! keywords like "last date" hit as contiguous substrings. Categories are
//! scanned in store order and a later category only replaces the current
//! best on strict improvement — first-registered wins ties.

use admitdesk_core::knowledge::QuickResponse;
use admitdesk_knowledge::KnowledgeStore;
use std::sync::Arc;
use tracing::debug;

/// Greeting phrases checked before any category scoring. Greeting takes
/// priority over all categories.
const GREETING_PATTERNS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "namaste",
    "greetings",
    "start",
    "begin",
    "help me",
];

/// Used when a store carries no greeting template at all, so an empty
/// knowledge base still answers a greeting.
const DEFAULT_GREETING: &str =
    "Hello! Welcome to the admission help desk. How can I assist you today?";

/// A quick-response hit.
#[derive(Debug, Clone)]
pub struct QuickMatch {
    /// The matched key: "greeting" or a category id
    pub key: String,
    /// The canonical template text
    pub text: String,
    /// Equivalent alternative phrasings, when the template has variants
    pub alternatives: Vec<String>,
    /// Keyword hit count (0 for greetings)
    pub score: usize,
}

/// Scores normalized text against greeting phrases and category keyword sets.
pub struct QuickResponseMatcher {
    store: Arc<KnowledgeStore>,
}

impl QuickResponseMatcher {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Match normalized text. `None` signals the caller to fall through to
    /// AI generation.
    pub fn match_query(&self, normalized: &str) -> Option<QuickMatch> {
        if let Some(greeting) = self.match_greeting(normalized) {
            return Some(greeting);
        }
        self.match_category(normalized)
    }

    fn match_greeting(&self, normalized: &str) -> Option<QuickMatch> {
        if !GREETING_PATTERNS.iter().any(|p| normalized.contains(p)) {
            return None;
        }

        let (text, alternatives) = match self.store.quick_responses().greeting() {
            Some(template) => (
                template.text().unwrap_or(DEFAULT_GREETING).to_string(),
                template.alternatives(),
            ),
            None => (DEFAULT_GREETING.to_string(), Vec::new()),
        };

        Some(QuickMatch {
            key: "greeting".into(),
            text,
            alternatives,
            score: 0,
        })
    }

    fn match_category(&self, normalized: &str) -> Option<QuickMatch> {
        let mut best: Option<(&str, usize)> = None;

        for category in self.store.categories() {
            let score = category
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(keyword.as_str()))
                .count();

            // Strict improvement only: ties resolve to the earlier category.
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((&category.id, score));
            }
        }

        let (key, score) = best?;
        let template = self.store.quick_responses().get(key)?;
        let text = template.text()?.to_string();

        debug!(category = key, score, "Quick response matched");

        Some(QuickMatch {
            key: key.to_string(),
            text,
            alternatives: template.alternatives(),
            score,
        })
    }
}
