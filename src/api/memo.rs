//! Write-through memoization of remote lookups.
//!
//! Responses are cached as JSON bytes under a key derived from the request.
//! Cached bytes that no longer decode are treated as a miss.

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::error::Result;

// == Cache Keys ==
/// Key for a listing page or a single resource: its URL.
pub fn page_key(page_url: &str) -> String {
    page_url.to_string()
}

pub fn pokemon_key(name: &str) -> String {
    format!("pokemon:{}", name)
}

// == Fetch Cached ==
/// Returns the cached value for `key`, or runs `fetch` and caches its result.
///
/// Only successful fetches populate the cache. An error from `fetch` is
/// returned as-is and leaves the cache untouched.
pub async fn fetch_cached<T, F, Fut>(cache: &Cache, key: &str, fetch: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(bytes) = cache.get(key).await {
        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => {
                debug!("Cache hit: {}", key);
                return Ok(value);
            }
            Err(e) => warn!("Discarding undecodable cache entry {}: {}", key, e),
        }
    } else {
        debug!("Cache miss: {}", key);
    }

    let value = fetch().await?;

    match serde_json::to_vec(&value) {
        Ok(bytes) => cache.add(key, bytes).await,
        Err(e) => warn!("Not caching {}: {}", key, e),
    }

    Ok(value)
}
