//! Error types.
//!
//! Only input and configuration errors reach callers. Lookup errors stay
//! inside the dictionary client, where they are logged and turned into a
//! dictionary miss.

use thiserror::Error;

/// Errors returned when parsing a phrase
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The phrase was empty after trimming
    #[error("Phrase is empty")]
    EmptyPhrase,
}

impl ParseError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyPhrase => "empty_phrase",
        }
    }
}

/// Reasons a single dictionary lookup failed
#[derive(Debug, Error)]
pub enum LookupError {
    /// The base URL could not be combined with the query parameters
    #[error("invalid dictionary URL `{0}`")]
    InvalidUrl(String),
    /// A configured request header is not a valid header value
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    /// Connection, TLS or timeout failure
    #[error("transport error: {0}")]
    Transport(String),
    /// The index answered with a non-success status
    #[error("HTTP error {0}")]
    Status(u16),
    /// The body was not the expected JSON shape
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Errors when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}
