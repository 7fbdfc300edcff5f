// File: radiobot-core/src/history.rs

use std::collections::VecDeque;
use parking_lot::Mutex;

use radiobot_common::models::PlayRecord;

/// Default number of plays kept in memory.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Fixed-capacity ring of detected plays, oldest first internally.
///
/// The polling cycle is the only writer. Command handlers read through
/// [`HistoryStore::snapshot`] concurrently, so the buffer sits behind a mutex.
/// Consecutive-duplicate suppression is the caller's job.
pub struct HistoryStore {
    records: Mutex<VecDeque<PlayRecord>>,
    capacity: usize,
}

impl HistoryStore {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert at the newest end, evicting the oldest record when full.
    pub fn append(&self, record: PlayRecord) {
        let mut records = self.records.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Up to `count` records, most recent first. `count` is clamped to
    /// `[1, capacity]` first.
    pub fn snapshot(&self, count: usize) -> Vec<PlayRecord> {
        let count = count.clamp(1, self.capacity);
        let records = self.records.lock();
        records.iter().rev().take(count).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Display title of the most recently appended record.
    pub fn last_title(&self) -> Option<String> {
        self.records.lock().back().map(|r| r.title.clone())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(i: usize) -> PlayRecord {
        PlayRecord::new(format!("Song {i}"), "12:00")
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let store = HistoryStore::new(50);
        for i in 1..=51 {
            store.append(rec(i));
        }
        assert_eq!(store.len(), 50);

        // most-recent-first: #51 down to #2
        let all = store.snapshot(50);
        assert_eq!(all.first().map(|r| r.title.as_str()), Some("Song 51"));
        assert_eq!(all.last().map(|r| r.title.as_str()), Some("Song 2"));
        let expected: Vec<String> = (2..=51).rev().map(|i| format!("Song {i}")).collect();
        let got: Vec<String> = all.into_iter().map(|r| r.title).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn snapshot_clamps_count() {
        let store = HistoryStore::new(50);
        for i in 1..=60 {
            store.append(rec(i));
        }
        assert_eq!(store.snapshot(0).len(), 1);
        assert_eq!(store.snapshot(0)[0].title, "Song 60");
        assert_eq!(store.snapshot(1000).len(), 50);
    }

    #[test]
    fn snapshot_shorter_than_request_and_does_not_mutate() {
        let store = HistoryStore::new(50);
        store.append(rec(1));
        store.append(rec(2));
        let snap = store.snapshot(10);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].title, "Song 2");
        assert_eq!(store.len(), 2);
        assert_eq!(store.last_title().as_deref(), Some("Song 2"));
    }

    #[test]
    fn empty_store() {
        let store = HistoryStore::default();
        assert!(store.is_empty());
        assert!(store.snapshot(5).is_empty());
        assert_eq!(store.last_title(), None);
        assert_eq!(store.capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
