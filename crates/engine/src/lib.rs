//! Request orchestration for admitdesk.
//!
//! The [`Orchestrator`] owns every dependent component — knowledge store,
//! pipeline stages, completion gateway, session ledger — and composes them
//! per request into the two-path decision: answer from a canned template, or
//! assemble a grounding prompt and delegate to the completion service. There
//! are no ambient globals; construct one and pass it by reference to
//! whatever serving layer embeds it.

mod orchestrator;

pub use orchestrator::{EngineStats, Orchestrator};
