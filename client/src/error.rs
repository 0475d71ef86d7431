//! Error types for the Todo API client

use thiserror::Error;
use todo_api_core::ProblemDetails;

/// Errors that can occur when talking to the Todo API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base address is not an absolute URL
    #[error("Invalid base address '{0}'")]
    InvalidBaseAddress(String),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body did not parse
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// The API rejected the request body
    #[error("Validation failed: {}", .0.title)]
    Validation(ProblemDetails),

    /// API returned an unexpected status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Problem detail, or the raw body when there is none
        message: String,
    },
}

impl ClientError {
    /// Field errors carried by a validation failure, if any.
    #[must_use]
    pub fn field_errors(&self, field: &str) -> &[String] {
        match self {
            Self::Validation(problem) => problem
                .errors
                .as_ref()
                .and_then(|errors| errors.get(field))
                .map_or(&[], Vec::as_slice),
            _ => &[],
        }
    }
}
