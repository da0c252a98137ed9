//! Knowledge base domain types.
//!
//! A knowledge document is a flat, categorized snapshot of admission facts:
//! ordered categories (each with a data payload and a keyword set), a FAQ
//! list, and a quick-response template table. Everything here is immutable
//! after load — the store built from a document is shared freely across
//! request handlers without synchronization.
//!
//! Categories are carried as an ordered `Vec`, not a map: scan order is
//! document order, which makes tie-breaking in keyword scoring deterministic
//! ("first registered category wins").

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One categorized block of admission facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier (e.g. "courses", "fees")
    pub id: String,

    /// Optional human title (e.g. "Fee Structure")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional one-line description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The data payload: strings, numbers, nested lists — anything JSON
    #[serde(default)]
    pub data: serde_json::Value,

    /// Keywords used for quick-response scoring and context selection
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Category {
    /// Create a category with just an id and data (no keywords).
    pub fn new(id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            data,
            keywords: Vec::new(),
        }
    }

    /// Attach keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a human title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Display label: the title if set, else the id with underscores
    /// replaced and words capitalized ("important_dates" → "Important Dates").
    pub fn label(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.id
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A frequently asked question with its canned answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    /// Owning category identifier
    #[serde(default)]
    pub category: String,
}

/// A quick-response template: one string, or a list of equivalent phrasings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuickResponse {
    Single(String),
    Variants(Vec<String>),
}

impl QuickResponse {
    /// The canonical text: the single template, or the first variant.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s.as_str()),
            Self::Variants(v) => v.first().map(String::as_str),
        }
    }

    /// The non-canonical variants (empty for a single template).
    pub fn alternatives(&self) -> Vec<String> {
        match self {
            Self::Single(_) => Vec::new(),
            Self::Variants(v) => v.iter().skip(1).cloned().collect(),
        }
    }
}

impl From<&str> for QuickResponse {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

/// Category id (plus the distinguished `greeting` / `fallback` keys) →
/// template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuickResponseTable {
    #[serde(flatten)]
    entries: HashMap<String, QuickResponse>,
}

impl QuickResponseTable {
    pub const GREETING: &'static str = "greeting";
    pub const FALLBACK: &'static str = "fallback";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, response: QuickResponse) {
        self.entries.insert(key.into(), response);
    }

    pub fn get(&self, key: &str) -> Option<&QuickResponse> {
        self.entries.get(key)
    }

    pub fn greeting(&self) -> Option<&QuickResponse> {
        self.get(Self::GREETING)
    }

    pub fn fallback(&self) -> Option<&QuickResponse> {
        self.get(Self::FALLBACK)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The document shape consumed at load time. Every field defaults, so a
/// minimal or partial document (even `{}`) deserializes cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub faq: Vec<FaqEntry>,

    #[serde(default)]
    pub quick_responses: QuickResponseTable,
}
