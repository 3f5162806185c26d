//! MIME gate: first of the three content checks.

use readtrail_core::IngestError;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

/// Normalize MIME type by stripping parameters and lower-casing
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Validate the declared content type against the image allowlist.
/// Returns the normalized MIME type on success.
pub fn validate_mime_type(declared: Option<&str>) -> Result<String, IngestError> {
    let normalized = declared.map(normalize_mime_type).unwrap_or_default();
    if normalized.is_empty() {
        return Err(IngestError::MissingContentType);
    }

    if !ALLOWED_IMAGE_TYPES.contains(&normalized.as_str()) {
        return Err(IngestError::MimeNotAllowed(normalized));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_types_in_any_case_with_params() {
        for mime in ALLOWED_IMAGE_TYPES {
            let upper = mime.to_uppercase();
            let with_charset = format!("{}; charset=utf-8", upper);
            assert_eq!(validate_mime_type(Some(*mime)).unwrap(), *mime);
            assert_eq!(validate_mime_type(Some(upper.as_str())).unwrap(), *mime);
            assert_eq!(validate_mime_type(Some(with_charset.as_str())).unwrap(), *mime);
        }
        assert_eq!(
            validate_mime_type(Some("Image/Png;charset=binary")).unwrap(),
            "image/png"
        );
    }

    #[test]
    fn missing_type_is_distinct() {
        assert_eq!(validate_mime_type(None), Err(IngestError::MissingContentType));
        assert_eq!(validate_mime_type(Some("")), Err(IngestError::MissingContentType));
        assert!(IngestError::MissingContentType
            .to_string()
            .contains("missing content type"));
    }

    #[test]
    fn rejects_svg_and_non_images() {
        for declared in ["image/svg+xml", "text/html", "application/octet-stream", "image/avif"] {
            let err = validate_mime_type(Some(declared)).unwrap_err();
            assert_eq!(err, IngestError::MimeNotAllowed(declared.to_string()));
            assert!(err.to_string().contains("type not allowed"));
        }
    }
}
