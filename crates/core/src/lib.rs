//! # Admitdesk Core
//!
//! Domain types, traits, and error definitions for the admitdesk admission
//! chatbot. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The completion service boundary is defined as a trait here; the HTTP
//! implementation lives in `admitdesk-providers`. This enables:
//! - Swapping the completion backend via configuration
//! - Easy testing with mock/stub gateways
//! - Clean dependency graph (all crates depend inward on core)

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod knowledge;

// Re-export key types at crate root for ergonomics
pub use envelope::{ResponseEnvelope, ResponseKind};
pub use error::{Error, GatewayError, InitError, KnowledgeError, Result};
pub use gateway::{
    CompletionGateway, CompletionRequest, GenerationConfig, HarmCategory, SafetySetting,
    SafetyThreshold,
};
pub use knowledge::{Category, FaqEntry, KnowledgeDocument, QuickResponse, QuickResponseTable};
