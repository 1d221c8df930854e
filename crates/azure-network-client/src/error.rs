//! Azure client errors and their classification

use thiserror::Error;

/// Semantic outcome of a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The resource does not exist.
    NotFound,
    /// Provider-side failure; the whole pass may be retried later.
    Transient,
    /// Anything else, including cancellation and permanent rejections.
    Fatal,
}

impl ErrorClass {
    /// Classifies an HTTP status code returned by the provider.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => ErrorClass::NotFound,
            500..=599 => ErrorClass::Transient,
            _ => ErrorClass::Fatal,
        }
    }

    /// True if an outer control loop may retry the pass.
    pub fn is_retryable(self) -> bool {
        self == ErrorClass::Transient
    }
}

/// Errors that can occur when interacting with the Azure Resource Manager API
#[derive(Debug, Error)]
pub enum AzureError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API answered with a non-success status
    #[error("{package}#{method}: {message}: StatusCode={status}")]
    Response {
        /// Client package that issued the request
        package: String,
        /// Client method that issued the request
        method: String,
        /// HTTP status code
        status: u16,
        /// Provider message, kept verbatim
        message: String,
    },

    /// A resource ID could not be parsed
    #[error("Invalid resource ID: {0}")]
    InvalidResourceId(String),

    /// The caller cancelled the request context
    #[error("context canceled")]
    Cancelled,

    /// The request context deadline passed
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// Missing or invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AzureError {
    /// Builds an error from a provider response.
    pub fn with_response(
        package: impl Into<String>,
        method: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        AzureError::Response {
            package: package.into(),
            method: method.into(),
            status,
            message: message.into(),
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AzureError::Response { status, .. } => Some(*status),
            AzureError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Maps the error to its semantic outcome.
    ///
    /// Only the status code is inspected; errors without one are fatal.
    pub fn classify(&self) -> ErrorClass {
        self.status().map_or(ErrorClass::Fatal, ErrorClass::from_status)
    }

    /// True if the provider reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.classify() == ErrorClass::NotFound
    }
}
