//! The periodic idle-session sweeper.
//!
//! Runs on its own `tokio::time::interval`, decoupled from request volume.
//! Each tick takes the same session-map lock as request handlers, so a sweep
//! cannot race a concurrent `touch`.

use crate::ledger::SessionLedger;
use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn the background sweep loop. The returned handle can be aborted to
/// stop sweeping (e.g. on shutdown); dropping it detaches the task.
pub fn spawn_sweeper(
    ledger: Arc<SessionLedger>,
    interval: Duration,
    max_idle_minutes: u64,
) -> JoinHandle<()> {
    let max_idle = ChronoDuration::minutes(max_idle_minutes as i64);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a fresh ledger is not
        // swept at startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = ledger.sweep(max_idle);
            debug!(removed, "Sweeper tick");
        }
    })
}
