//! Cache Handle Module
//!
//! Ties the shared store and its reaper together. Building a `Cache` always
//! starts the sweep; `stop` (or dropping the handle) ends it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::spawn_reaper;

// == Cache ==
/// Self-cleaning expiring cache shared between the shell and its reaper.
///
/// Every access goes through the whole-map lock. The reaper sweeps once per
/// TTL, so a stale entry may linger for up to about two TTLs before the sweep
/// reclaims it, but `get` never returns it.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    shutdown: watch::Sender<bool>,
    reaper: JoinHandle<()>,
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and spawns its reaper on the current runtime.
    ///
    /// `ttl` is both the maximum entry age and the sweep period.
    ///
    /// # Errors
    /// Returns `PokedexError::InvalidTtl` for a zero TTL.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(PokedexError::InvalidTtl(ttl));
        }

        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper(store.clone(), ttl, shutdown_rx);

        info!("Cache created with ttl={:?}", ttl);
        Ok(Self {
            store,
            ttl,
            shutdown,
            reaper,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Add ==
    /// Inserts or replaces `key`, resetting its age.
    pub async fn add(&self, key: impl Into<String>, value: Vec<u8>) {
        self.store.lock().await.add(key, value);
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// A stale entry is removed by this call.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().await.get(key)
    }

    // == Stop ==
    /// Signals the reaper to stop. Returns immediately.
    ///
    /// Safe to call more than once. After stopping, entries are only removed
    /// lazily by `get`.
    pub fn stop(&self) {
        if !self.shutdown.send_replace(true) {
            info!("Stopping cache reaper");
        }
    }

    /// Returns true until the reaper task has actually finished.
    pub fn is_running(&self) -> bool {
        !self.reaper.is_finished()
    }

    // == Inspection ==
    /// Number of entries held, including stale ones not yet removed.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{self, Instant};

    const TTL: Duration = Duration::from_secs(5);

    async fn wait_for_reaper_exit(cache: &Cache) {
        let deadline = Instant::now() + Duration::from_secs(1);
        while cache.is_running() {
            assert!(Instant::now() < deadline, "reaper did not stop");
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let result = Cache::new(Duration::ZERO);
        assert!(matches!(result, Err(PokedexError::InvalidTtl(_))));
    }

    #[tokio::test]
    async fn test_add_get() {
        let cache = Cache::new(TTL).unwrap();

        cache.add("https://example.com", b"testdata".to_vec()).await;
        assert_eq!(
            cache.get("https://example.com").await,
            Some(b"testdata".to_vec())
        );
        assert_eq!(cache.get("https://example.com/other").await, None);

        cache.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_lazy_expiry_scenario() {
        let cache = Cache::new(TTL).unwrap();
        cache.add("A", vec![1, 2, 3]).await;

        time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("A").await, Some(vec![1, 2, 3]));

        // Stop first so only the lazy path can remove the entry
        cache.stop();
        wait_for_reaper_exit(&cache).await;

        time::advance(Duration::from_secs(4)).await;
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("A").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readd_resets_age() {
        let cache = Cache::new(TTL).unwrap();

        cache.add("k", b"v1".to_vec()).await;
        time::advance(Duration::from_millis(4_900)).await;
        cache.add("k", b"v2".to_vec()).await;
        time::advance(Duration::from_millis(150)).await;

        assert_eq!(cache.get("k").await, Some(b"v2".to_vec()));
        cache.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_untouched_entry() {
        let cache = Cache::new(TTL).unwrap();
        cache.add("untouched", b"value".to_vec()).await;

        time::sleep(TTL * 2 + Duration::from_millis(1)).await;

        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.reaped, 1);
        cache.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_sweep() {
        let cache = Cache::new(TTL).unwrap();
        cache.add("stale", b"value".to_vec()).await;

        cache.stop();
        wait_for_reaper_exit(&cache).await;

        time::sleep(TTL * 20).await;
        assert_eq!(cache.len().await, 1);
        assert!(!cache.is_running());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let cache = Cache::new(TTL).unwrap();
        assert!(cache.is_running());

        cache.stop();
        cache.stop();
        wait_for_reaper_exit(&cache).await;

        cache.stop();
        assert!(!cache.is_running());
    }

    #[tokio::test]
    async fn test_drop_stops_reaper() {
        let cache = Cache::new(TTL).unwrap();
        let store = cache.store.clone();

        drop(cache);

        let deadline = Instant::now() + Duration::from_secs(1);
        while Arc::strong_count(&store) > 1 {
            assert!(Instant::now() < deadline, "reaper still holds the store");
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_access() {
        let cache = Arc::new(Cache::new(Duration::from_millis(20)).unwrap());

        let mut tasks = Vec::new();
        for worker in 0..8 {
            let cache = cache.clone();
            tasks.push(tokio::spawn(async move {
                for i in 0..200 {
                    let key = format!("key-{}", i % 16);
                    let value = format!("{}-{}", worker, i).into_bytes();
                    cache.add(key.clone(), value).await;
                    if let Some(found) = cache.get(&key).await {
                        assert!(!found.is_empty());
                    }
                }
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }

        assert!(cache.len().await <= 16);
        cache.stop();
    }
}
