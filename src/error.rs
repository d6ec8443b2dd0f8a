//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache and its collaborators.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache constructed with a TTL that cannot drive the reaper
    #[error("Invalid TTL {0:?}: cache TTL must be a positive duration")]
    InvalidTtl(Duration),

    /// Transport-level failure talking to the catalog API
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog API answered with a non-success status
    #[error("status code error: {status} from {url}")]
    Status { url: String, status: StatusCode },

    /// Response body was not the JSON we expected
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing command output or reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command needs an argument that was not given
    #[error("Command '{0}' requires an argument")]
    MissingArgument(String),

    /// No command registered under this name
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ttl_message() {
        let err = PokedexError::InvalidTtl(Duration::ZERO);
        assert!(err.to_string().contains("positive duration"));
    }

    #[test]
    fn test_status_message_includes_url() {
        let err = PokedexError::Status {
            url: "http://localhost/pokemon/missingno".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("missingno"));
    }

    #[test]
    fn test_decode_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PokedexError = json_err.into();
        assert!(matches!(err, PokedexError::Decode(_)));
    }
}
