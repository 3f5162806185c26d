//! ReadTrail Core Library
//!
//! This crate provides the domain models, error taxonomy and configuration
//! shared by the image ingestion pipeline and its callers.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{IngestConfig, FETCH_TIMEOUT_MS, MAX_IMAGE_SIZE_KB, SIZE_WARN_THRESHOLD_KB};
pub use error::{ErrorKind, ErrorMetadata, IngestError, LogLevel};
