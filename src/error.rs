//! Error types for vktop
//!
//! The taxonomy separates the two fatal outcomes a caller must tell apart
//! (account not found vs. upstream service failure) from transport-level
//! failures. Rate limiting is not represented here: it is recovered inside
//! the retry loop and never surfaces to callers.

use thiserror::Error;

/// Result type alias for vktop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vktop
#[derive(Debug, Error)]
pub enum Error {
    /// The account identifier does not resolve to a VK wall.
    ///
    /// The message is complete and names the requested account when the
    /// in-flight context identified one.
    #[error("{0}")]
    NotFound(String),

    /// VK reported a failure this crate cannot recover from
    #[error("VK API error {code}: {message}")]
    Upstream {
        /// Numeric error code as reported by the API
        code: i64,
        /// The API's own error message, verbatim
        message: String,
    },

    /// Network error (connect, timeout, TLS, body decode)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "script_iterations")
        key: Option<String>,
    },
}

impl Error {
    /// True for errors meaning the requested account does not exist,
    /// as opposed to a service failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
