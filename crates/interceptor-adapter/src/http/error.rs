/*
[INPUT]:  Error sources (HTTP transport, API status, serialization, URL building)
[OUTPUT]: Structured error type with retry hints
[POS]:    Error handling layer - unified error type for the adapter crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the interceptor adapter
#[derive(Error, Debug)]
pub enum InterceptorError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InterceptorError {
    /// Check if the error is worth retrying on the next cycle
    pub fn is_retryable(&self) -> bool {
        match self {
            InterceptorError::Http(_) | InterceptorError::InvalidResponse(_) => true,
            InterceptorError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Check if the service reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, InterceptorError::Api { code: 404, .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        InterceptorError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for interceptor operations
pub type Result<T> = std::result::Result<T, InterceptorError>;
