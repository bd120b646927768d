//! Error types for spacetravel.
//!
//! This module provides a unified error type with explicit variants for
//! transport, content API, schema, date and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for spacetravel operations.
///
/// Callers that only care about one failure mode (an unknown slug, for
/// instance) can match on the variant directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or filesystem transport errors.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The content API answered with a non-success status.
    #[error("content API error: {0}")]
    Api(#[from] ApiError),

    /// No document of the given type has the requested uid.
    #[error("{document_type} '{uid}' not found")]
    NotFound { document_type: String, uid: String },

    /// The content API returned JSON of an unexpected shape.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaError),

    /// A timestamp could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] InvalidDateError),

    /// Input validation errors (bad URL, document type, page size).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error means the requested document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
            || matches!(self, Error::Api(api) if api.status == 404)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Local filesystem error.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Error returned by the content API with a non-success status.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body (if present).
    pub error: Option<String>,
    /// Error message from the response body (if present).
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if the API rejected the access token.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Unexpected JSON shape from the content API.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The response body was not valid JSON or lacked required keys.
    #[error("malformed response: {reason}")]
    Response { reason: String },

    /// A document envelope was malformed.
    #[error("malformed document: {reason}")]
    Document { reason: String },

    /// A document's `data` did not match the expected fields.
    #[error("document {id} has unexpected fields: {reason}")]
    Fields { id: String, reason: String },
}

/// Timestamp parsing errors.
#[derive(Debug, Error)]
#[error("'{value}' is not an ISO 8601 timestamp")]
pub struct InvalidDateError {
    /// The rejected input.
    pub value: String,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid content API URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid document type identifier.
    #[error("invalid document type '{value}': {reason}")]
    DocumentType { value: String, reason: String },

    /// Unsupported locale tag.
    #[error("unsupported locale '{value}'")]
    Locale { value: String },

    /// Page size outside the accepted range.
    #[error("page size must be at least 1, got {value}")]
    PageSize { value: u32 },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code_and_message() {
        let err = ApiError::new(
            400,
            Some("parsing-error".to_string()),
            Some("unexpected token".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 400 [parsing-error]: unexpected token");
    }

    #[test]
    fn not_found_covers_api_404() {
        let err = Error::Api(ApiError::new(404, None, None));
        assert!(err.is_not_found());

        let err = Error::NotFound {
            document_type: "posts".to_string(),
            uid: "missing".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "posts 'missing' not found");
    }
}
