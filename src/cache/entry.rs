//! Cache Entry Module
//!
//! Defines a single memoized payload stamped with its creation time.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload together with the instant it was inserted.
///
/// Entries are never mutated in place. Re-adding a key builds a fresh entry
/// with a new timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, already serialized by the caller
    pub value: Vec<u8>,
    /// Insertion instant
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with `created_at`.
    pub fn with_timestamp(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how old the entry is as observed at `now`.
    ///
    /// An observation instant earlier than the creation instant yields zero.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// fresh. Only an age strictly greater than the TTL counts as expired.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        self.age_at(now) > ttl
    }
}
