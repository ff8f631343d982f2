//! Error types for the FieldHub provider

use core_forms::source::FormSourceError;
use thiserror::Error;

/// FieldHub provider errors
#[derive(Error, Debug)]
pub enum FieldHubError {
    /// API request returned a non-retryable error status
    #[error("FieldHub API error (status {status_code}) from {url}")]
    Api { status_code: u16, url: String },

    /// Server rejected the request as unauthenticated or unauthorized
    #[error("Authentication required by {url}")]
    AuthRequired { url: String },

    /// Transport-level failure (DNS, connect, timeout)
    #[error("Network error reaching {url}: {message}")]
    Network { url: String, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse FieldHub response from {url}: {message}")]
    Parse { url: String, message: String },
}

/// Result type for FieldHub operations
pub type Result<T> = std::result::Result<T, FieldHubError>;

impl From<FieldHubError> for FormSourceError {
    fn from(error: FieldHubError) -> Self {
        match error {
            FieldHubError::Api { status_code, url } => FormSourceError::ServerError {
                status_code,
                server_url: url,
            },
            FieldHubError::AuthRequired { url } => {
                FormSourceError::AuthRequired { server_url: url }
            }
            FieldHubError::Network { url, .. } => {
                FormSourceError::Unreachable { server_url: url }
            }
            FieldHubError::Parse { url, message } => FormSourceError::ParseError { url, message },
        }
    }
}
