//! Reaper Task
//!
//! Background task that periodically sweeps expired entries out of the cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the sweep task for a cache store.
///
/// The first sweep runs one `period` after spawning, then every `period`
/// after that. Between ticks the task waits on whichever comes first: the
/// next tick or a change on `shutdown`. Once shutdown is observed the task
/// returns and never sweeps again. A dropped sender counts as shutdown.
///
/// # Arguments
/// * `store` - shared store, locked once per sweep
/// * `period` - interval between sweeps, must be non-zero
/// * `shutdown` - receiver flipped to `true` to stop the task
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
/// let (stop_tx, stop_rx) = watch::channel(false);
/// let handle = spawn_reaper(store.clone(), ttl, stop_rx);
/// // Later:
/// stop_tx.send_replace(true);
/// ```
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache reaper with period of {:?}", period);

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = store.lock().await.reap_expired();

                    if removed > 0 {
                        debug!("Cache sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Cache sweep: no expired entries found");
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}
