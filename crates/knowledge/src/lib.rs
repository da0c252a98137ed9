//! Knowledge store and loader strategies for admitdesk.
//!
//! The store holds the categorized admission facts, FAQ list, quick-response
//! table, and a derived keyword index. It is read-only at query time. The
//! loader tries an explicit ordered list of sources (organized document,
//! structured extract, built-in fallback); the first that yields a document
//! wins.

pub mod builtin;
pub mod loader;
pub mod store;

pub use loader::{KnowledgeLoader, KnowledgeSource};
pub use store::{KnowledgeStore, SearchIndex};
