//! File assembler: filename sanitization, extension derivation and packaging.

use bytes::Bytes;
use readtrail_core::models::{IngestedFile, DEFAULT_COVER_FILENAME};
use reqwest::Url;

use crate::mime::normalize_mime_type;

pub const DEFAULT_EXTENSION: &str = "jpg";

/// Map a MIME subtype or file suffix to the stored extension.
fn known_extension(token: &str) -> Option<&'static str> {
    match token {
        "jpeg" | "jpg" => Some("jpg"),
        "png" => Some("png"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        "bmp" => Some("bmp"),
        _ => None,
    }
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let normalized = normalize_mime_type(content_type);
    let subtype = normalized.strip_prefix("image/")?;
    known_extension(subtype)
}

fn extension_from_url(url: &Url) -> Option<&'static str> {
    let last = url.path_segments()?.next_back()?;
    let (_, suffix) = last.rsplit_once('.')?;
    known_extension(&suffix.to_lowercase())
}

/// Extension priority: declared content type, then the URL path suffix, then `jpg`.
/// A present-but-unknown content type does not fall through to the URL.
pub fn derive_extension(content_type: Option<&str>, source_url: Option<&Url>) -> &'static str {
    let derived = match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
        Some(ct) => extension_from_content_type(ct),
        None => source_url.and_then(extension_from_url),
    };
    derived.unwrap_or(DEFAULT_EXTENSION)
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
/// An empty name becomes `cover`.
pub fn sanitize_filename(filename: &str) -> String {
    if filename.is_empty() {
        return DEFAULT_COVER_FILENAME.to_string();
    }

    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn build_file(
    data: Bytes,
    content_type: Option<&str>,
    desired_filename: &str,
    source_url: Option<&Url>,
) -> IngestedFile {
    let extension = derive_extension(content_type, source_url);
    let mime_type = content_type
        .map(normalize_mime_type)
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| mime_for_extension(extension).to_string());

    IngestedFile {
        data,
        mime_type,
        filename: format!("{}.{}", sanitize_filename(desired_filename), extension),
    }
}
