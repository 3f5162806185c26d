//! Data models for the ingestion pipeline
//!
//! All values are request-scoped: created by one pipeline run and owned by
//! its caller afterwards.

mod image;
mod report;

pub use image::*;
pub use report::*;
