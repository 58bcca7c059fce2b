use thiserror::Error;
use std::io;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, MdtoolError>;

/// Errors that can occur while generating a README
#[derive(Debug, Error)]
pub enum MdtoolError {
    /// Missing or unusable configuration (credentials, config file)
    #[error("Config error: {0}")]
    Config(String),

    /// Input validation errors, e.g. a malformed repository reference
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote repository or path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// GitHub API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Any other non-success response from the GitHub API
    #[error("GitHub API error (HTTP {status}): {message}")]
    GitHubApi {
        /// HTTP status code
        status: u16,
        /// Response body or summary
        message: String,
    },

    /// No file survived filtering
    #[error("No suitable files found: {0}")]
    EmptyResult(String),

    /// The completion API answered with a non-success status or an error payload
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw body or the API-reported error message
        message: String,
    },

    /// The completion API answered without usable text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File content could not be decoded into text
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
}

impl MdtoolError {
    /// Checks if this error is transient, i.e. a later attempt might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimitExceeded(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::GitHubApi { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
