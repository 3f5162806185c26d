//! Error types module
//!
//! This module provides the error taxonomy for the image ingestion pipeline.
//! Every expected failure of a pipeline stage is a variant of `IngestError`;
//! callers match on it (or on its `ErrorKind`) instead of catching panics.
//!
//! The `ErrorMetadata` trait classifies each variant for presentation: a stable
//! error code, whether retrying can help, a suggested action and the log level
//! the failure should be reported at.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like timeouts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Coarse failure categories of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad URL, rejected before any network call
    InvalidInput,
    /// Unreachable host, DNS failure, connection reset, body read failure
    NetworkFailure,
    /// The fetch exceeded its time bound
    TimeoutFailure,
    /// Non-2xx HTTP status
    ProtocolFailure,
    /// Disallowed MIME type or oversized payload
    PolicyViolation,
    /// Magic-byte mismatch, unsupported or truncated signature
    IntegrityViolation,
    /// Failures of the runtime itself (client construction)
    Internal,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "HTTP_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the caller
    fn suggested_action(&self) -> Option<&'static str>;

    /// Human-readable message suitable for a non-technical user
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Network error or CORS restriction: {0}")]
    Network(String),

    #[error("Request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("HTTP error {status}")]
    Http { status: u16 },

    #[error("Response is missing content type")]
    MissingContentType,

    #[error("Content type not allowed: {0}")]
    MimeNotAllowed(String),

    #[error("Image too large ({size_kb}KB). Maximum allowed is {max_kb}KB")]
    TooLarge { size_kb: u64, max_kb: u64 },

    #[error("Unsupported image type for signature check: {0}")]
    UnsupportedSignature(String),

    #[error("File is too short to contain a {0} signature")]
    TruncatedSignature(String),

    #[error("File content does not match claimed type {0}")]
    SignatureMismatch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (kind, error_code, recoverable, suggested_action, log_level).
/// client_message stays per-variant for dynamic content.
fn ingest_error_static_metadata(
    err: &IngestError,
) -> (ErrorKind, &'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        IngestError::InvalidUrl(_) => (
            ErrorKind::InvalidInput,
            "INVALID_URL",
            false,
            Some("Provide an absolute http:// or https:// image URL"),
            LogLevel::Debug,
        ),
        IngestError::Network(_) => (
            ErrorKind::NetworkFailure,
            "NETWORK_ERROR",
            true,
            Some("Check the connection or download the image manually"),
            LogLevel::Warn,
        ),
        IngestError::Timeout { .. } => (
            ErrorKind::TimeoutFailure,
            "TIMEOUT",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        IngestError::Http { .. } => (
            ErrorKind::ProtocolFailure,
            "HTTP_ERROR",
            false,
            Some("Verify the image URL still exists"),
            LogLevel::Debug,
        ),
        IngestError::MissingContentType => (
            ErrorKind::PolicyViolation,
            "MISSING_CONTENT_TYPE",
            false,
            Some("Use a URL that serves an image directly"),
            LogLevel::Debug,
        ),
        IngestError::MimeNotAllowed(_) => (
            ErrorKind::PolicyViolation,
            "MIME_NOT_ALLOWED",
            false,
            Some("Use a JPEG, PNG, GIF, WebP or BMP image"),
            LogLevel::Debug,
        ),
        IngestError::TooLarge { .. } => (
            ErrorKind::PolicyViolation,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Store a link to the image instead of embedding it"),
            LogLevel::Debug,
        ),
        IngestError::UnsupportedSignature(_) => (
            ErrorKind::IntegrityViolation,
            "UNSUPPORTED_SIGNATURE",
            false,
            Some("Use a JPEG, PNG, GIF, WebP or BMP image"),
            LogLevel::Warn,
        ),
        IngestError::TruncatedSignature(_) => (
            ErrorKind::IntegrityViolation,
            "TRUNCATED_IMAGE",
            false,
            Some("The image appears to be incomplete; try another source"),
            LogLevel::Warn,
        ),
        IngestError::SignatureMismatch(_) => (
            ErrorKind::IntegrityViolation,
            "SIGNATURE_MISMATCH",
            false,
            Some("The server mislabels this file; try another source"),
            LogLevel::Warn,
        ),
        IngestError::Internal(_) => (
            ErrorKind::Internal,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl IngestError {
    /// Coarse category of this failure
    pub fn kind(&self) -> ErrorKind {
        ingest_error_static_metadata(self).0
    }

    /// Measured size for size-policy failures
    pub fn size_in_kb(&self) -> Option<u64> {
        match self {
            IngestError::TooLarge { size_kb, .. } => Some(*size_kb),
            _ => None,
        }
    }

    /// Whether the caller should keep a link to the source instead of the bytes
    pub fn use_fallback(&self) -> bool {
        matches!(self, IngestError::TooLarge { .. })
    }
}

impl ErrorMetadata for IngestError {
    fn error_code(&self) -> &'static str {
        ingest_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        ingest_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        ingest_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        ingest_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            IngestError::InvalidUrl(_) => "Please enter a valid image URL".to_string(),
            IngestError::Network(_) => {
                "Could not download the image. The site may block direct downloads".to_string()
            }
            IngestError::Timeout { .. } => "The image took too long to download".to_string(),
            IngestError::Http { status } => {
                format!("The image could not be downloaded (HTTP {})", status)
            }
            IngestError::Internal(_) => "Something went wrong while downloading".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_names_status() {
        let err = IngestError::Http { status: 404 };
        assert_eq!(err.to_string(), "HTTP error 404");
        assert_eq!(err.kind(), ErrorKind::ProtocolFailure);
        assert_eq!(err.error_code(), "HTTP_ERROR");
    }

    #[test]
    fn timeout_is_distinct_from_network_failure() {
        let timeout = IngestError::Timeout { after_ms: 30_000 };
        let network = IngestError::Network("connection reset".to_string());
        assert_ne!(timeout.kind(), network.kind());
        assert!(timeout.is_recoverable());
        assert!(network.is_recoverable());
        assert!(timeout.to_string().contains("timed out"));
    }

    #[test]
    fn only_size_failures_recommend_fallback() {
        let too_large = IngestError::TooLarge {
            size_kb: 600,
            max_kb: 512,
        };
        assert!(too_large.use_fallback());
        assert_eq!(too_large.size_in_kb(), Some(600));
        assert!(too_large.to_string().contains("600KB"));
        assert!(too_large.to_string().contains("too large"));

        let mismatch = IngestError::SignatureMismatch("image/png".to_string());
        assert!(!mismatch.use_fallback());
        assert_eq!(mismatch.size_in_kb(), None);
    }

    #[test]
    fn integrity_failures_log_at_warn() {
        for err in [
            IngestError::UnsupportedSignature("image/svg+xml".to_string()),
            IngestError::TruncatedSignature("image/png".to_string()),
            IngestError::SignatureMismatch("image/png".to_string()),
        ] {
            assert_eq!(err.kind(), ErrorKind::IntegrityViolation);
            assert_eq!(err.log_level(), LogLevel::Warn);
        }
    }

    #[test]
    fn client_message_hides_transport_detail() {
        let err = IngestError::Network("dns error: failed to lookup address".to_string());
        assert!(!err.client_message().contains("dns"));
        assert_eq!(
            IngestError::MimeNotAllowed("image/svg+xml".to_string()).client_message(),
            "Content type not allowed: image/svg+xml"
        );
    }
}
