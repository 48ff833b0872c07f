//! Search-history recording.
//!
//! Every keyword search records its normalized keyword, fire-and-forget:
//! a sink failure must never fail the search itself, so [`HistorySink`]
//! has no error channel.

use chrono::Utc;
use itertools::Itertools;
use parking_lot::Mutex;
use tracing::info;

/// Receives one entry per keyword search.
pub trait HistorySink: Sync {
    fn record(&self, keyword: &str);
}

/// Trim and collapse inner whitespace, matching what the store would do on
/// write.
pub fn normalize_entry(keyword: &str) -> String {
    keyword.split_whitespace().join(" ")
}

/// Default sink: emits a structured log event under the `search_history`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHistory;

impl HistorySink for TracingHistory {
    fn record(&self, keyword: &str) {
        let entry = normalize_entry(keyword);
        if !entry.is_empty() {
            info!(target: "search_history", keyword = %entry, "search_history_entry");
        }
    }
}

/// In-memory sink for tests and embedding hosts: keeps (timestamp-ms,
/// keyword) pairs behind a mutex so it can record through `&self`.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<(i64, String)>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded keywords, oldest first.
    pub fn keywords(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, k)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl HistorySink for MemoryHistory {
    fn record(&self, keyword: &str) {
        let entry = normalize_entry(keyword);
        if !entry.is_empty() {
            self.entries
                .lock()
                .push((Utc::now().timestamp_millis(), entry));
        }
    }
}
