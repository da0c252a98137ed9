//! The read-only knowledge store.
//!
//! Built once from a `KnowledgeDocument`, then shared freely (it is
//! immutable, so no synchronization is needed). Construction derives the
//! keyword search index: every keyword of every category maps to the set of
//! category ids that declare it.

use admitdesk_core::knowledge::{Category, FaqEntry, KnowledgeDocument, QuickResponseTable};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Keyword → ids of the categories declaring that keyword.
pub type SearchIndex = BTreeMap<String, BTreeSet<String>>;

/// Categorized admission facts, FAQ list, quick-response table, and the
/// derived keyword index. Immutable after construction.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    categories: Vec<Category>,
    faqs: Vec<FaqEntry>,
    quick_responses: QuickResponseTable,
    index: SearchIndex,
}

impl KnowledgeStore {
    /// Build a store from a document, deriving the search index.
    pub fn from_document(doc: KnowledgeDocument) -> Self {
        let mut index: SearchIndex = BTreeMap::new();
        for category in &doc.categories {
            for keyword in &category.keywords {
                index
                    .entry(keyword.clone())
                    .or_default()
                    .insert(category.id.clone());
            }
        }

        debug!(
            categories = doc.categories.len(),
            faqs = doc.faq.len(),
            keywords = index.len(),
            "Knowledge store built"
        );

        Self {
            categories: doc.categories,
            faqs: doc.faq,
            quick_responses: doc.quick_responses,
            index,
        }
    }

    /// An entirely empty store. Useful for tests and degraded startup.
    pub fn empty() -> Self {
        Self::from_document(KnowledgeDocument::default())
    }

    /// Categories in document order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The FAQ list in document order.
    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    /// The quick-response template table.
    pub fn quick_responses(&self) -> &QuickResponseTable {
        &self.quick_responses
    }

    /// The derived keyword index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Ids of the categories declaring `keyword` (empty when unknown).
    pub fn categories_for_keyword(&self, keyword: &str) -> Vec<&str> {
        self.index
            .get(keyword)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn faq_count(&self) -> usize {
        self.faqs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admitdesk_core::knowledge::Category;
    use serde_json::json;

    fn two_category_doc() -> KnowledgeDocument {
        KnowledgeDocument {
            categories: vec![
                Category::new("fees", json!({"annual": "100000 INR"}))
                    .with_keywords(["fee", "cost", "payment"]),
                Category::new("important_dates", json!({"start": "March"}))
                    .with_keywords(["date", "deadline", "cost"]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn index_covers_every_keyword() {
        let store = KnowledgeStore::from_document(two_category_doc());

        for category in store.categories() {
            for keyword in &category.keywords {
                let ids = store.categories_for_keyword(keyword);
                assert!(
                    ids.contains(&category.id.as_str()),
                    "keyword {keyword:?} missing category {:?} in index",
                    category.id
                );
            }
        }
    }

    #[test]
    fn shared_keyword_maps_to_both_categories() {
        let store = KnowledgeStore::from_document(two_category_doc());
        let ids = store.categories_for_keyword("cost");
        assert_eq!(ids, vec!["fees", "important_dates"]);
    }

    #[test]
    fn unknown_keyword_yields_nothing() {
        let store = KnowledgeStore::from_document(two_category_doc());
        assert!(store.categories_for_keyword("hostel").is_empty());
    }

    #[test]
    fn empty_store_is_usable() {
        let store = KnowledgeStore::empty();
        assert_eq!(store.category_count(), 0);
        assert_eq!(store.faq_count(), 0);
        assert!(store.quick_responses().is_empty());
        assert!(store.category("university").is_none());
    }

    #[test]
    fn category_lookup_by_id() {
        let store = KnowledgeStore::from_document(two_category_doc());
        assert!(store.category("fees").is_some());
        assert_eq!(
            store.category("fees").unwrap().data["annual"],
            "100000 INR"
        );
    }
}
