//! Remote image ingestion for ReadTrail book covers.
//!
//! Fetches an image by URL, validates it (declared MIME type, size, magic
//! bytes) and packages it as an [`IngestedFile`](readtrail_core::models::IngestedFile).
//! Every stage is a plain function returning `Result<_, IngestError>`;
//! [`ImageIngestor`] chains them and short-circuits on the first failure.

pub mod assemble;
pub mod content;
pub mod fetch;
pub mod magic;
pub mod mime;
pub mod pipeline;
pub mod size;
pub mod url;

pub use assemble::{build_file, derive_extension, sanitize_filename};
pub use content::validate_content;
pub use fetch::{HttpFetcher, ImageFetcher};
pub use magic::{detect_image_mime, validate_image_magic_bytes};
pub use mime::{normalize_mime_type, validate_mime_type, ALLOWED_IMAGE_TYPES};
pub use pipeline::{fetch_image_as_file, ImageIngestor};
pub use size::{validate_file_size, SizePolicy};
pub use url::{is_valid_image_url, is_valid_image_url_value, parse_image_url};
