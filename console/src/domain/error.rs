//! Domain-level error types.
//!
//! These errors are transport agnostic. Stores map port failures into them,
//! and inbound adapters map them to whatever notification the operator sees.

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed local validation and was never sent to the server.
    Validation,
    /// The remote service rejected the supplied credentials.
    Unauthorized,
    /// The requested record does not exist on the server.
    NotFound,
    /// The transport failed before a response arrived.
    Network,
    /// The server answered with a non-success status or an unreadable body.
    Server,
    /// Durable credential storage could not be read or written.
    Storage,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use admin_console::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user 23 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message for adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Whether re-triggering the same operation may succeed.
    ///
    /// Nothing in the domain retries automatically; callers decide.
    pub fn is_retryable(&self) -> bool {
        matches!(self.code, ErrorCode::Network | ErrorCode::Server)
    }

    /// Convenience constructor for [`ErrorCode::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    /// Convenience constructor for [`ErrorCode::Server`].
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Server, message)
    }

    /// Convenience constructor for [`ErrorCode::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
