//! Thread-safe session ledger — tracks sessions, bounded conversation
//! history, and usage counters, and serves usage reports.
//!
//! Interior mutability via `RwLock` over the session map and an atomic
//! global counter, so the ledger is shared by reference from concurrent
//! request handlers. The lock is never held across an await point.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Conversation turns retained per session.
const DEFAULT_MAX_TURNS: usize = 10;

/// One query/response exchange within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Monotonically increasing turn number within the session
    pub turn: u64,
    pub timestamp: DateTime<Utc>,
    /// The raw user query, as received
    pub query: String,
    pub response: String,
}

/// Per-session bookkeeping. Turn history is a FIFO ring: once at capacity,
/// the oldest turn is evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub query_count: u64,
    pub turns: VecDeque<ConversationTurn>,
    #[serde(skip)]
    turn_seq: u64,
}

impl SessionRecord {
    fn new(id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            created_at: now,
            last_activity: now,
            query_count: 0,
            turns: VecDeque::new(),
            turn_seq: 0,
        }
    }
}

/// Ledger-wide usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub active_sessions: usize,
    pub total_requests: u64,
    pub uptime_secs: u64,
    pub requests_per_minute: f64,
}

/// The session ledger.
pub struct SessionLedger {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    total_requests: AtomicU64,
    started_at: DateTime<Utc>,
    max_turns: usize,
}

impl SessionLedger {
    /// Create a ledger with the default per-session turn capacity (10).
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            total_requests: AtomicU64::new(0),
            started_at: Utc::now(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Override the per-session turn capacity.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Create the session if absent, update its last-activity time, and
    /// increment the session and global counters. Returns a snapshot.
    pub fn touch(&self, session_id: &str) -> SessionRecord {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        let now = Utc::now();
        let mut sessions = self.sessions.write().unwrap();
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session = session_id, "New session created");
                SessionRecord::new(session_id, now)
            });
        record.last_activity = now;
        record.query_count += 1;
        record.clone()
    }

    /// Append a conversation turn, evicting the oldest at capacity.
    pub fn record_turn(&self, session_id: &str, query: &str, response: &str) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().unwrap();
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRecord::new(session_id, now));

        record.turn_seq += 1;
        record.turns.push_back(ConversationTurn {
            turn: record.turn_seq,
            timestamp: now,
            query: query.to_string(),
            response: response.to_string(),
        });
        while record.turns.len() > self.max_turns {
            record.turns.pop_front();
        }
    }

    /// A snapshot of one session, if it exists.
    pub fn session(&self, session_id: &str) -> Option<SessionRecord> {
        self.sessions.read().unwrap().get(session_id).cloned()
    }

    /// The conversation history of one session (empty if unknown).
    pub fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.sessions
            .read()
            .unwrap()
            .get(session_id)
            .map(|r| r.turns.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Seconds elapsed since the session was created.
    pub fn session_duration_secs(&self, session_id: &str) -> Option<u64> {
        self.sessions
            .read()
            .unwrap()
            .get(session_id)
            .map(|r| (Utc::now() - r.created_at).num_seconds().max(0) as u64)
    }

    /// Remove one session (conversation reset). Returns whether it existed.
    pub fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().unwrap().remove(session_id).is_some()
    }

    /// Remove sessions idle longer than `max_idle`. Returns how many were
    /// removed.
    pub fn sweep(&self, max_idle: Duration) -> usize {
        self.sweep_at(Utc::now(), max_idle)
    }

    /// Time-parameterized sweep, for deterministic tests.
    pub fn sweep_at(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, record| now - record.last_activity <= max_idle);
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Swept idle sessions");
        }
        removed
    }

    /// Ledger-wide usage statistics.
    pub fn stats(&self) -> SessionStats {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let uptime_secs = (Utc::now() - self.started_at).num_seconds().max(0) as u64;
        let uptime_minutes = (uptime_secs as f64 / 60.0).max(1.0);

        SessionStats {
            active_sessions: self.sessions.read().unwrap().len(),
            total_requests,
            uptime_secs,
            requests_per_minute: total_requests as f64 / uptime_minutes,
        }
    }
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new()
    }
}
