//! Loader strategy chain.
//!
//! Knowledge can come from several places, in decreasing order of quality:
//! a fully organized document produced by the data pipeline, a raw
//! structured extract that gets promoted to the organized shape, or the
//! built-in fallback set. The chain is an explicit ordered list of sources
//! tried in sequence; the first success wins. Each attempt is logged, so a
//! degraded start is visible in the logs rather than silent.

use crate::builtin;
use crate::store::KnowledgeStore;
use admitdesk_core::error::KnowledgeError;
use admitdesk_core::knowledge::{Category, KnowledgeDocument, QuickResponseTable};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A single knowledge source in the chain.
#[derive(Debug, Clone)]
pub enum KnowledgeSource {
    /// A fully organized document (categories + FAQ + quick responses)
    Organized(PathBuf),
    /// A raw structured extract, promoted to the organized shape on load
    Structured(PathBuf),
    /// The built-in fallback set; never fails
    Builtin,
}

impl KnowledgeSource {
    /// Short tag for logs and provenance.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Organized(_) => "organized",
            Self::Structured(_) => "structured",
            Self::Builtin => "builtin",
        }
    }
}

/// An ordered chain of knowledge sources.
pub struct KnowledgeLoader {
    sources: Vec<KnowledgeSource>,
}

impl KnowledgeLoader {
    /// An empty chain. Add sources with [`with_source`](Self::with_source).
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a source to the chain.
    pub fn with_source(mut self, source: KnowledgeSource) -> Self {
        self.sources.push(source);
        self
    }

    /// The standard chain: organized path (if configured), structured path
    /// (if configured), then the built-in fallback.
    pub fn standard(organized: Option<&Path>, structured: Option<&Path>) -> Self {
        let mut loader = Self::new();
        if let Some(path) = organized {
            loader = loader.with_source(KnowledgeSource::Organized(path.to_path_buf()));
        }
        if let Some(path) = structured {
            loader = loader.with_source(KnowledgeSource::Structured(path.to_path_buf()));
        }
        loader.with_source(KnowledgeSource::Builtin)
    }

    /// Number of sources in the chain.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Try each source in order; build a store from the first document that
    /// loads. Returns the store and the tag of the winning source.
    pub fn load(&self) -> Result<(KnowledgeStore, &'static str), KnowledgeError> {
        for source in &self.sources {
            match Self::try_source(source) {
                Ok(doc) => {
                    info!(
                        source = source.tag(),
                        categories = doc.categories.len(),
                        faqs = doc.faq.len(),
                        "Knowledge document loaded"
                    );
                    return Ok((KnowledgeStore::from_document(doc), source.tag()));
                }
                Err(e) => {
                    warn!(source = source.tag(), error = %e, "Knowledge source failed, trying next");
                }
            }
        }
        Err(KnowledgeError::Exhausted)
    }

    fn try_source(source: &KnowledgeSource) -> Result<KnowledgeDocument, KnowledgeError> {
        match source {
            KnowledgeSource::Organized(path) => {
                let content = Self::read(path)?;
                serde_json::from_str(&content).map_err(|e| KnowledgeError::Parse {
                    path: path.clone(),
                    reason: e.to_string(),
                })
            }
            KnowledgeSource::Structured(path) => {
                let content = Self::read(path)?;
                let raw: serde_json::Value =
                    serde_json::from_str(&content).map_err(|e| KnowledgeError::Parse {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(promote_structured(&raw))
            }
            KnowledgeSource::Builtin => Ok(builtin::fallback_document()),
        }
    }

    fn read(path: &Path) -> Result<String, KnowledgeError> {
        std::fs::read_to_string(path).map_err(|e| KnowledgeError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for KnowledgeLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Promote a raw structured extract to the organized document shape.
///
/// The raw extract has flat top-level sections (`university_info`, `courses`,
/// `fees`, ...). Each becomes a category carrying that section as its data
/// payload. Promoted categories have no keyword lists, so quick-response
/// scoring yields nothing and context selection falls back to the default
/// category set — the data is still available for grounding prompts.
pub fn promote_structured(raw: &serde_json::Value) -> KnowledgeDocument {
    let section = |key: &str| raw.get(key).cloned().unwrap_or_else(|| json!({}));

    let categories = vec![
        Category::new("university", section("university_info")),
        Category::new(
            "courses",
            json!({"undergraduate": {"engineering": section("courses")}}),
        ),
        Category::new("eligibility", section("eligibility")),
        Category::new("fees", section("fees")),
        Category::new("important_dates", section("important_dates")),
        Category::new("facilities", section("facilities")),
        Category::new("placement", section("placement_info")),
        Category::new("contact", section("contact_info")),
    ];

    let mut quick_responses = QuickResponseTable::new();
    quick_responses.insert(QuickResponseTable::GREETING, builtin::DEFAULT_GREETING.into());
    quick_responses.insert(QuickResponseTable::FALLBACK, builtin::DEFAULT_FALLBACK.into());

    KnowledgeDocument {
        categories,
        faq: Vec::new(),
        quick_responses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn organized_source_wins_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("organized_data.json");
        fs::write(
            &path,
            r#"{
                "categories": [{"id": "fees", "data": {"annual": "100000"}, "keywords": ["fee"]}],
                "faq": [],
                "quick_responses": {"greeting": "Hello!", "fallback": "Sorry."}
            }"#,
        )
        .unwrap();

        let loader = KnowledgeLoader::standard(Some(&path), None);
        let (store, tag) = loader.load().unwrap();
        assert_eq!(tag, "organized");
        assert_eq!(store.category_count(), 1);
        assert!(store.category("fees").is_some());
    }

    #[test]
    fn missing_file_falls_through_to_builtin() {
        let loader = KnowledgeLoader::standard(
            Some(Path::new("/nonexistent/organized.json")),
            Some(Path::new("/nonexistent/structured.json")),
        );
        let (store, tag) = loader.load().unwrap();
        assert_eq!(tag, "builtin");
        assert!(store.quick_responses().greeting().is_some());
    }

    #[test]
    fn malformed_document_falls_through() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("organized_data.json");
        fs::write(&path, "{ not json at all").unwrap();

        let loader = KnowledgeLoader::standard(Some(&path), None);
        let (_, tag) = loader.load().unwrap();
        assert_eq!(tag, "builtin");
    }

    #[test]
    fn structured_extract_is_promoted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("structured_data.json");
        fs::write(
            &path,
            r#"{
                "university_info": {"name": "MMMUT", "location": "Gorakhpur"},
                "courses": ["CSE", "IT"],
                "fees": {"annual": "100000"}
            }"#,
        )
        .unwrap();

        let loader = KnowledgeLoader::standard(None, Some(&path));
        let (store, tag) = loader.load().unwrap();
        assert_eq!(tag, "structured");

        let university = store.category("university").unwrap();
        assert_eq!(university.data["name"], "MMMUT");

        // Courses get wrapped under the organized shape
        let courses = store.category("courses").unwrap();
        assert_eq!(courses.data["undergraduate"]["engineering"][0], "CSE");

        // Promoted documents still answer greetings
        assert!(store.quick_responses().greeting().is_some());
    }

    #[test]
    fn promoted_categories_have_no_keywords() {
        let doc = promote_structured(&serde_json::json!({"fees": {"annual": "1"}}));
        assert!(doc.categories.iter().all(|c| c.keywords.is_empty()));
    }

    #[test]
    fn chain_without_builtin_can_exhaust() {
        let loader = KnowledgeLoader::new()
            .with_source(KnowledgeSource::Organized("/nonexistent/a.json".into()));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, KnowledgeError::Exhausted));
    }

    #[test]
    fn partial_document_tolerated() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("organized_data.json");
        fs::write(&path, r#"{"quick_responses": {"greeting": "Hi!"}}"#).unwrap();

        let loader = KnowledgeLoader::standard(Some(&path), None);
        let (store, tag) = loader.load().unwrap();
        assert_eq!(tag, "organized");
        assert_eq!(store.category_count(), 0);
        assert!(store.quick_responses().greeting().is_some());
    }
}
