//! Error types for FMC operations.
//!
//! This module provides the error hierarchy shared by the FMC crates, covering
//! configuration, authentication, HTTP status and transport failures.

use thiserror::Error;

/// Main error type for FMC operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration error (missing environment variables, bad client settings)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The token endpoint rejected the credentials or returned an unusable session
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// HTTP status returned by the token endpoint, if a response was received
        status: Option<u16>,
        /// Error message
        message: String,
    },

    /// Non-success status from a configuration API call
    #[error("HTTP request failed with status {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Connection, DNS or TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Operation timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Invalid endpoint URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Response body could not be parsed
    #[error("Failed to parse FMC response: {0}")]
    ParseError(String),

    /// Payload or identifier rejected before sending
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Specialized result type for FMC operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::AuthenticationFailed { .. } => "AUTHENTICATION_FAILED",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::AuthenticationFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::AuthenticationFailed { .. } | Self::Network(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else if err.is_builder() {
            Self::ConfigError(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
