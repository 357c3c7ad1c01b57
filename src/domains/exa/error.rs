//! Exa client error types.

use thiserror::Error;

/// Result type for Exa API calls.
pub type ExaResult<T> = Result<T, ExaError>;

/// Errors that can occur while talking to the Exa API.
#[derive(Debug, Error)]
pub enum ExaError {
    /// No API key was configured for the client.
    #[error("EXA_API_KEY is not configured")]
    MissingApiKey,

    /// The request could not be sent or the connection failed.
    #[error("Request to Exa failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured base URL cannot carry a request path.
    #[error("Invalid Exa base URL '{0}'")]
    InvalidBaseUrl(String),

    /// A research task id that cannot name a single path segment.
    #[error("Invalid research task id '{0}'")]
    InvalidTaskId(String),

    /// Exa answered with a non-success status.
    #[error("Exa API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode Exa response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ExaError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
