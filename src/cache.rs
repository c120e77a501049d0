//! Process-wide cache from hash to found password. Append-only, no
//! eviction, guarded so reads never block each other — the same
//! concurrent-map idiom the fleet uses for its own inode tracking.

use dashmap::DashMap;

#[derive(Default)]
pub struct Cache {
    entries: DashMap<String, String>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &str) -> Option<String> {
        self.entries.get(hash).map(|entry| entry.clone())
    }

    /// Inserts `password` for `hash` if absent. A hash already present
    /// keeps its existing password — cache entries never change once
    /// written (monotonicity).
    pub fn put(&self, hash: &str, password: &str) {
        self.entries
            .entry(hash.to_string())
            .or_insert_with(|| password.to_string());
    }
}
