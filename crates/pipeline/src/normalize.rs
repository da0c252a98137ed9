//! Query normalization.
//!
//! Deterministic, order-sensitive pipeline: trim, lowercase, strip characters
//! outside word chars / space / hyphen / period, collapse whitespace, expand
//! abbreviations on word boundaries, then apply the ordered question-pattern
//! rewrites. Never fails; empty input yields empty output.

use regex::Regex;

/// Whole-word abbreviation table. Entries are non-overlapping given the
/// word-boundary rule, so application order across the table does not change
/// the outcome.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("cse", "computer science engineering"),
    ("ece", "electronics and communication engineering"),
    ("eee", "electrical and electronics engineering"),
    ("ee", "electrical engineering"),
    ("me", "mechanical engineering"),
    ("ce", "civil engineering"),
    ("it", "information technology"),
    ("btech", "bachelor of technology"),
    ("b.tech", "bachelor of technology"),
    ("mtech", "master of technology"),
    ("m.tech", "master of technology"),
    ("phd", "doctor of philosophy"),
    ("ph.d", "doctor of philosophy"),
    ("mmmut", "madan mohan malaviya university of technology"),
    ("gorakhpur", "gorakhpur uttar pradesh"),
    ("up", "uttar pradesh"),
];

/// Question-pattern rewrites, applied sequentially — later rules see the
/// output of earlier ones.
const REWRITES: &[(&str, &str)] = &[
    (r"\bwhat\s+is\s+the\s+", "tell me about the "),
    (r"\bhow\s+much\s+", "what is the cost of "),
    (r"\bwhen\s+is\s+", "what are the dates for "),
    (r"\bwhere\s+is\s+", "what is the location of "),
    (r"\bcan\s+i\s+", "am i eligible for "),
    (r"\bdo\s+you\s+have\s+", "does mmmut offer "),
];

/// Canonicalizes raw user text. Compile once, reuse for every query.
pub struct QueryNormalizer {
    strip: Regex,
    whitespace: Regex,
    abbreviations: Vec<(Regex, &'static str)>,
    rewrites: Vec<(Regex, &'static str)>,
}

impl QueryNormalizer {
    pub fn new() -> Self {
        let abbreviations = ABBREVIATIONS
            .iter()
            .map(|(abbr, full)| {
                let pattern = format!(r"\b{}\b", regex::escape(abbr));
                (
                    Regex::new(&pattern).expect("static abbreviation pattern"),
                    *full,
                )
            })
            .collect();

        let rewrites = REWRITES
            .iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("static rewrite pattern"),
                    *replacement,
                )
            })
            .collect();

        Self {
            strip: Regex::new(r"[^\w\s\-\.]").expect("static strip pattern"),
            whitespace: Regex::new(r"\s+").expect("static whitespace pattern"),
            abbreviations,
            rewrites,
        }
    }

    /// Normalize raw text. Total: any input produces some output.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let mut text = trimmed.to_lowercase();

        // Punctuation is replaced with spaces first, then runs collapse to a
        // single space — stripping must not leave double spaces behind, or
        // normalization would not be idempotent.
        text = self.strip.replace_all(&text, " ").into_owned();
        text = self.whitespace.replace_all(&text, " ").trim().to_string();

        for (pattern, replacement) in &self.abbreviations {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }

        for (pattern, replacement) in &self.rewrites {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }

        text
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> QueryNormalizer {
        QueryNormalizer::new()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let n = normalizer();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   \t\n  "), "");
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        let n = normalizer();
        assert_eq!(n.normalize("  Fee   STRUCTURE  "), "fee structure");
    }

    #[test]
    fn strips_punctuation_to_spaces() {
        let n = normalizer();
        assert_eq!(n.normalize("fees? (for hostel!)"), "fees for hostel");
        // Hyphens and periods survive
        assert_eq!(n.normalize("cut-off marks."), "cut-off marks.");
    }

    #[test]
    fn expands_abbreviations_on_word_boundaries() {
        let n = normalizer();
        assert_eq!(
            n.normalize("cse seats"),
            "computer science engineering seats"
        );
        assert_eq!(n.normalize("BTech fees"), "bachelor of technology fees");
        // "it" expands only as a whole word, never inside other words
        assert_eq!(n.normalize("is it good"), "is information technology good");
        assert!(!n.normalize("hostel visit").contains("information technology"));
    }

    #[test]
    fn dotted_abbreviations_expand() {
        let n = normalizer();
        assert_eq!(
            n.normalize("b.tech admission"),
            "bachelor of technology admission"
        );
    }

    #[test]
    fn question_patterns_rewrite_in_order() {
        let n = normalizer();
        assert_eq!(
            n.normalize("What is the fee structure"),
            "tell me about the fee structure"
        );
        assert_eq!(
            n.normalize("how much is the hostel"),
            "what is the cost of is the hostel"
        );
        assert_eq!(
            n.normalize("can i apply"),
            "am i eligible for apply"
        );
    }

    #[test]
    fn institution_abbreviation_expands() {
        let n = normalizer();
        assert_eq!(
            n.normalize("about MMMUT"),
            "about madan mohan malaviya university of technology"
        );
    }

    #[test]
    fn idempotent_on_sample_inputs() {
        let n = normalizer();
        let samples = [
            "hello",
            "What is the fee structure for B.Tech?",
            "cse eligibility criteria",
            "tell me about the hostel facilities",
            "placement record and average package",
            "  mixed   CASE    and  spaces ",
        ];
        for sample in samples {
            let once = n.normalize(sample);
            let twice = n.normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn multi_word_phrases_survive_normalization() {
        let n = normalizer();
        let out = n.normalize("what is the LAST DATE to apply?");
        assert!(out.contains("last date"));
    }
}
