//! Context assembly.
//!
//! Serializes the knowledge relevant to a query into a bounded text block
//! for prompt grounding. The university block always comes first; category
//! relevance is keyword-substring based with a fixed default set when
//! nothing matches (better to over-inform than to send an empty context);
//! FAQs are ranked by word-set overlap with the question.

use admitdesk_core::knowledge::FaqEntry;
use admitdesk_knowledge::KnowledgeStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// The category id whose block always leads the context.
const UNIVERSITY: &str = "university";

/// Included when no category keyword matches the query.
const DEFAULT_CATEGORIES: &[&str] = &["courses", "eligibility", "fees"];

/// FAQs included per query.
const FAQ_LIMIT: usize = 3;

/// Assembles a bounded grounding block from the knowledge store.
pub struct ContextAssembler {
    store: Arc<KnowledgeStore>,
    max_chars: usize,
}

impl ContextAssembler {
    pub fn new(store: Arc<KnowledgeStore>, max_chars: usize) -> Self {
        Self { store, max_chars }
    }

    /// Assemble the context for a normalized query.
    ///
    /// Block order is fixed: university, relevant categories in store order,
    /// then the FAQ block. Blocks past the character cap are dropped whole;
    /// the university block is never dropped.
    pub fn assemble(&self, normalized: &str) -> String {
        let mut blocks: Vec<String> = Vec::new();

        if let Some(university) = self.store.category(UNIVERSITY) {
            blocks.push(Self::category_block(
                &university.label(),
                &university.data,
            ));
        }

        for id in self.relevant_categories(normalized) {
            if let Some(category) = self.store.category(&id) {
                if category.data.is_null() {
                    continue;
                }
                blocks.push(Self::category_block(&category.label(), &category.data));
            }
        }

        let faqs = self.relevant_faqs(normalized);
        if !faqs.is_empty() {
            let faq_text: Vec<String> = faqs
                .iter()
                .map(|faq| format!("Q: {}\nA: {}", faq.question, faq.answer))
                .collect();
            blocks.push(format!("Relevant FAQs:\n{}", faq_text.join("\n")));
        }

        self.join_capped(blocks)
    }

    /// Non-university categories whose keywords occur in the query, in store
    /// order; the fixed default set when none match.
    fn relevant_categories(&self, normalized: &str) -> Vec<String> {
        let matched: Vec<String> = self
            .store
            .categories()
            .iter()
            .filter(|c| c.id != UNIVERSITY)
            .filter(|c| c.keywords.iter().any(|k| normalized.contains(k.as_str())))
            .map(|c| c.id.clone())
            .collect();

        if matched.is_empty() {
            debug!("No category keywords matched, using default set");
            DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
        } else {
            matched
        }
    }

    /// FAQs ranked by word-set overlap with the query, descending. The sort
    /// is stable, so equal-overlap FAQs keep their document order.
    fn relevant_faqs(&self, normalized: &str) -> Vec<&FaqEntry> {
        let query_words: HashSet<&str> = normalized.split_whitespace().collect();

        let mut ranked: Vec<(&FaqEntry, usize)> = self
            .store
            .faqs()
            .iter()
            .map(|faq| {
                let question = faq.question.to_lowercase();
                let question_words: HashSet<&str> = question.split_whitespace().collect();
                let overlap = query_words.intersection(&question_words).count();
                (faq, overlap)
            })
            .filter(|(_, overlap)| *overlap > 0)
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(FAQ_LIMIT).map(|(faq, _)| faq).collect()
    }

    fn category_block(label: &str, data: &serde_json::Value) -> String {
        let rendered =
            serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        format!("{label} Information: {rendered}")
    }

    /// Join blocks with blank-line separators, dropping whole trailing
    /// blocks past the cap. The first block always survives.
    fn join_capped(&self, blocks: Vec<String>) -> String {
        let mut out = String::new();
        for (i, block) in blocks.into_iter().enumerate() {
            let extra = if out.is_empty() { block.len() } else { block.len() + 2 };
            if i > 0 && out.len() + extra > self.max_chars {
                debug!(kept = i, "Context cap reached, dropping remaining blocks");
                break;
            }
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&block);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admitdesk_core::knowledge::{Category, KnowledgeDocument};
    use admitdesk_knowledge::builtin;
    use serde_json::json;

    fn sample_store() -> Arc<KnowledgeStore> {
        Arc::new(KnowledgeStore::from_document(builtin::sample_document()))
    }

    fn assembler() -> ContextAssembler {
        ContextAssembler::new(sample_store(), 4000)
    }

    #[test]
    fn university_block_always_first() {
        let asm = assembler();
        for query in ["hostel fees", "placement record", "random unrelated words"] {
            let context = asm.assemble(query);
            assert!(
                context.starts_with("About MMMUT Information:"),
                "university block not first for {query:?}"
            );
        }
    }

    #[test]
    fn matching_category_included() {
        let asm = assembler();
        let context = asm.assemble("hostel and library details");
        assert!(context.contains("Campus Facilities Information:"));
    }

    #[test]
    fn no_match_falls_back_to_default_set() {
        let asm = assembler();
        let context = asm.assemble("zzz qqq nothing relevant");
        assert!(context.contains("Courses Offered Information:"));
        assert!(context.contains("Eligibility Criteria Information:"));
        assert!(context.contains("Fee Structure Information:"));
        // Unmatched non-default categories stay out
        assert!(!context.contains("Placements Information:"));
    }

    #[test]
    fn faq_ranking_by_overlap() {
        let asm = assembler();
        // Strongly overlaps the fee FAQ, weakly overlaps others
        let context = asm.assemble("what is the fee structure for bachelor of technology");
        let fee_pos = context
            .find("What is the fee structure for B.Tech?")
            .expect("fee FAQ missing");
        // The eligibility FAQ shares fewer words; if present it must come after
        if let Some(other_pos) = context.find("What is the eligibility criteria") {
            assert!(fee_pos < other_pos);
        }
    }

    #[test]
    fn faq_limit_enforced() {
        let asm = assembler();
        // "what is the" overlaps many FAQ questions
        let context = asm.assemble("what is the fee structure eligibility placement courses");
        let count = context.matches("Q: ").count();
        assert!(count <= FAQ_LIMIT, "got {count} FAQs");
    }

    #[test]
    fn no_faq_block_when_nothing_overlaps() {
        let asm = assembler();
        let context = asm.assemble("zzz qqq");
        assert!(!context.contains("Relevant FAQs:"));
    }

    #[test]
    fn blocks_separated_by_blank_lines() {
        let asm = assembler();
        let context = asm.assemble("hostel fees");
        assert!(context.contains("\n\n"));
    }

    #[test]
    fn cap_drops_whole_trailing_blocks() {
        let store = sample_store();
        let university_len = ContextAssembler::category_block(
            "About MMMUT",
            &store.category("university").unwrap().data,
        )
        .len();

        // Cap fits only the university block
        let asm = ContextAssembler::new(store, university_len + 10);
        let context = asm.assemble("hostel fees placement dates");
        assert!(context.starts_with("About MMMUT Information:"));
        assert!(!context.contains("Campus Facilities Information:"));
    }

    #[test]
    fn university_block_survives_tiny_cap() {
        let asm = ContextAssembler::new(sample_store(), 10);
        let context = asm.assemble("fees");
        assert!(context.starts_with("About MMMUT Information:"));
    }

    #[test]
    fn store_without_university_produces_context_anyway() {
        let store = Arc::new(KnowledgeStore::from_document(KnowledgeDocument {
            categories: vec![
                Category::new("fees", json!({"annual": "100000"})).with_keywords(["fee"]),
            ],
            ..Default::default()
        }));
        let asm = ContextAssembler::new(store, 4000);
        let context = asm.assemble("fee details");
        assert!(context.contains("Fees Information:"));
    }
}
