//! Cache Module
//!
//! In-memory expiring cache for memoized remote lookups. One TTL governs the
//! whole instance; stale entries are dropped lazily on lookup and swept
//! periodically in the background.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
