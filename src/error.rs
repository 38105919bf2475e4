//! Error types for the Pokedex shell
//!
//! Provides unified error handling using thiserror. Cache lookups never fail;
//! these errors come from construction, the remote client, and decoding.

use std::time::Duration;

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the Pokedex shell.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The cache TTL doubles as the sweep period and must be non-zero
    #[error("Invalid cache TTL: {0:?} (must be greater than zero)")]
    InvalidTtl(Duration),

    /// The configured API base URL cannot be used
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure talking to the remote API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-success status
    #[error("Response failed with status code: {status} and body: {body}")]
    Status { status: u16, body: String },

    /// A response body could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex shell.
pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = PokedexError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Response failed with status code: 404 and body: Not Found"
        );
    }

    #[test]
    fn test_json_conversion() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PokedexError = parse_err.into();
        assert!(matches!(err, PokedexError::Json(_)));
    }
}
