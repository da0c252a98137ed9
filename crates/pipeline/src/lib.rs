//! The query routing and prompt-assembly pipeline.
//!
//! Four stages, each a standalone component:
//!
//! 1. **QueryNormalizer** — canonicalizes raw user text (casing, whitespace,
//!    abbreviation expansion, question-pattern rewriting)
//! 2. **QuickResponseMatcher** — scores normalized text against category
//!    keyword sets; a hit short-circuits AI generation entirely
//! 3. **ContextAssembler** — selects relevant knowledge categories and FAQs
//!    and serializes them into a bounded grounding block
//! 4. **PromptBuilder** — merges persona, context, and question into a single
//!    completion-service prompt
//!
//! Matching is deliberately lexical (substring counting, word-set overlap),
//! not semantic, so routing decisions stay cheap and reproducible.

pub mod context;
pub mod normalize;
pub mod prompt;
pub mod quick;

pub use context::ContextAssembler;
pub use normalize::QueryNormalizer;
pub use prompt::PromptBuilder;
pub use quick::{QuickMatch, QuickResponseMatcher};
