//! Session ledger and conversation bookkeeping for admitdesk.
//!
//! Tracks per-session conversation history (bounded ring buffer) and
//! per-session/global usage counters. Independent of the routing pipeline;
//! invoked by the orchestrator around each request. The idle sweeper runs on
//! its own periodic timer, decoupled from request handling.

pub mod ledger;
pub mod sweeper;

pub use ledger::{ConversationTurn, SessionLedger, SessionRecord, SessionStats};
pub use sweeper::spawn_sweeper;
