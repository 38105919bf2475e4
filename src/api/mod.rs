//! API Module
//!
//! Remote lookups against the PokeAPI and their memoization in the cache.
//!
//! # Resources
//! - `GET location-area/` - paginated listing of location areas
//! - `GET location-area/{name}` - Pokemon encounters in one area
//! - `GET pokemon/{name}` - a single Pokemon record

pub mod client;
pub mod memo;
pub mod types;

pub use client::PokeApiClient;
pub use memo::fetch_cached;
pub use types::{LocationArea, LocationAreaPage, NamedResource, Pokemon};
