//! Error types for the watsonx.data SDK
//!
//! This module defines the error hierarchy for the entire SDK.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use thiserror::Error;

/// The main error type for the watsonx.data SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Construction Errors
    // ============================================================================
    /// Required parameters were absent, null or empty
    #[error("Missing required parameters: {}", names.join(", "))]
    MissingRequiredParameters {
        /// Caller-facing names, in declaration order
        names: Vec<String>,
    },

    /// A parameter value cannot be used
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// What is wrong with it
        message: String,
    },

    /// Service URL or resolved request URL did not parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid service configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// YAML config did not parse
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization or parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Credentials could not be obtained or attached
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message
        message: String,
    },

    // ============================================================================
    // Transport / HTTP Errors
    // ============================================================================
    /// Connection-level failure, no HTTP response
    #[error("Transport error: {message}")]
    Transport {
        /// Error message
        message: String,
        /// Underlying client error
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Message extracted from the body, or the canonical reason
        message: String,
        /// Parsed JSON body, if any
        body: Option<Value>,
    },

    /// Response body did not match the expected type
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Error message
        message: String,
    },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// Pager misuse or exhausted pager
    #[error("Pagination error: {message}")]
    PaginationState {
        /// Error message
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing-parameters error
    pub fn missing_params<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingRequiredParameters {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a transport error without an underlying cause
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a pagination state error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::PaginationState {
            message: message.into(),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Result type alias for the watsonx.data SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
