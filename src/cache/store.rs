//! Cache Store Module
//!
//! HashMap storage with a single TTL that governs every entry. Freshness is
//! enforced lazily on lookup and eagerly by `reap_expired`.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key/value storage for memoized lookups.
///
/// The store does no locking of its own. `Cache` wraps it in a mutex and
/// shares it with the reaper.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum age of an entry, fixed at construction
    ttl: Duration,
    /// Usage statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    pub fn add(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.add_at(key, value, Instant::now());
    }

    /// Inserts or replaces the entry for `key`, stamped with `now`.
    ///
    /// Replacing an entry resets its age.
    pub fn add_at(&mut self, key: impl Into<String>, value: Vec<u8>, now: Instant) {
        self.entries.insert(key.into(), CacheEntry::with_timestamp(value, now));
    }

    // == Get ==
    /// Returns a copy of the value for `key` if it is present and fresh.
    ///
    /// A stale entry is removed as part of the lookup.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        self.get_at(key, Instant::now())
    }

    /// Same as `get`, observing freshness at `now`.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<Vec<u8>> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired_at(self.ttl, now) {
            self.entries.remove(key);
            self.stats.record_expired();
            return None;
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        Some(value)
    }

    // == Reap Expired ==
    /// Removes every entry older than the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self) -> usize {
        self.reap_expired_at(Instant::now())
    }

    /// Same as `reap_expired`, observing freshness at `now`.
    pub fn reap_expired_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(ttl, now));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries currently held, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if an entry for `key` is held, without checking freshness.
    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_add_and_get() {
        let mut store = CacheStore::new(TTL);

        store.add("https://example.com", b"testdata".to_vec());
        assert_eq!(store.get("https://example.com"), Some(b"testdata".to_vec()));

        store.add("https://example.com/path", b"moretestdata".to_vec());
        assert_eq!(
            store.get("https://example.com/path"),
            Some(b"moretestdata".to_vec())
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(TTL);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_empty_key_and_value() {
        let mut store = CacheStore::new(TTL);
        store.add("", Vec::new());
        assert_eq!(store.get(""), Some(Vec::new()));
    }

    #[test]
    fn test_store_lazy_expiry_scenario() {
        let start = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.add_at("A", vec![1, 2, 3], start);
        assert_eq!(store.get_at("A", start + secs(2)), Some(vec![1, 2, 3]));

        assert_eq!(store.get_at("A", start + secs(6)), None);
        assert!(!store.contains_key("A"));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_fresh_at_exact_ttl() {
        let start = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.add_at("key", b"v".to_vec(), start);
        assert_eq!(store.get_at("key", start + TTL), Some(b"v".to_vec()));
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let start = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.add_at("key", b"v1".to_vec(), start);
        store.add_at("key", b"v2".to_vec(), start + secs(4));

        // 6s after the first add, 2s after the second
        assert_eq!(store.get_at("key", start + secs(6)), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_reap_expired() {
        let start = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.add_at("old", b"1".to_vec(), start);
        store.add_at("boundary", b"2".to_vec(), start + secs(1));
        store.add_at("new", b"3".to_vec(), start + secs(4));

        let removed = store.reap_expired_at(start + secs(6));
        assert_eq!(removed, 1);
        assert!(!store.contains_key("old"));
        assert!(store.contains_key("boundary"));
        assert!(store.contains_key("new"));
    }

    #[test]
    fn test_store_reap_empty() {
        let mut store = CacheStore::new(TTL);
        assert_eq!(store.reap_expired(), 0);
    }

    #[test]
    fn test_store_stats() {
        let start = Instant::now();
        let mut store = CacheStore::new(TTL);

        store.add_at("a", b"1".to_vec(), start);
        store.add_at("b", b"2".to_vec(), start);
        store.add_at("c", b"3".to_vec(), start + secs(3));

        store.get_at("a", start + secs(1)); // hit
        store.get_at("missing", start + secs(1)); // miss
        store.get_at("a", start + secs(6)); // expired
        store.reap_expired_at(start + secs(6)); // reaps b

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.reaped, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
