use reqwest::StatusCode;
use thiserror::Error;

use crate::infrastructure::retry::Transient;

/// Errors that can occur when talking to an OpenAI-compatible API
#[derive(Error, Debug)]
pub enum OpenAiError {
    /// No API key configured and `OPENAI_API_KEY` unset
    #[error("OpenAI API key not set. Set OPENAI_API_KEY or configure api_key")]
    MissingApiKey,

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Invalid or missing API key (HTTP 401/403)
    #[error("Authentication failed ({0}): {1}")]
    Unauthorized(StatusCode, String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,

    /// Server-side failure (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    Server(StatusCode, String),

    /// Any other non-success status
    #[error("Request rejected ({0}): {1}")]
    Rejected(StatusCode, String),

    /// Request exceeded the client-side timeout
    #[error("Request timeout")]
    Timeout,

    /// Connection-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Body could not be parsed or lacked the expected data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl OpenAiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(status, body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            s if s.is_server_error() => Self::Server(status, body),
            _ => Self::Rejected(status, body),
        }
    }
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl Transient for OpenAiError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Server(_, _) | Self::Timeout | Self::Network(_)
        )
    }
}
