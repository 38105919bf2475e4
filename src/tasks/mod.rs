//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: sweeps expired cache entries once per TTL

mod reaper;

pub use reaper::spawn_reaper;
