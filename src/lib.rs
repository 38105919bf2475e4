//! Pokedex - an interactive shell over the PokeAPI
//!
//! Remote lookups are memoized in an in-memory cache whose entries expire
//! after a single TTL and are swept by a background task.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod repl;
pub mod tasks;

pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
