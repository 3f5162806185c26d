//! Magic-byte gate: last of the three content checks.
//!
//! Guards against MIME spoofing by matching the leading bytes of the payload
//! against the signature of the claimed type. The claimed type is normalized
//! here again rather than trusted from the MIME gate.
//!
//! Signatures are data: `None` marks a wildcard position. A type may list
//! several signatures (GIF87a and GIF89a); any one of them matching is enough.

use readtrail_core::IngestError;
use tracing::warn;

use crate::mime::normalize_mime_type;

type Pattern = &'static [Option<u8>];

const JPEG: Pattern = &[Some(0xFF), Some(0xD8), Some(0xFF)];
const PNG: Pattern = &[
    Some(0x89),
    Some(0x50),
    Some(0x4E),
    Some(0x47),
    Some(0x0D),
    Some(0x0A),
    Some(0x1A),
    Some(0x0A),
];
const GIF87A: Pattern = &[Some(0x47), Some(0x49), Some(0x46), Some(0x38), Some(0x37), Some(0x61)];
const GIF89A: Pattern = &[Some(0x47), Some(0x49), Some(0x46), Some(0x38), Some(0x39), Some(0x61)];
// "RIFF", 4-byte chunk length, "WEBP"
const WEBP: Pattern = &[
    Some(0x52),
    Some(0x49),
    Some(0x46),
    Some(0x46),
    None,
    None,
    None,
    None,
    Some(0x57),
    Some(0x45),
    Some(0x42),
    Some(0x50),
];
const BMP: Pattern = &[Some(0x42), Some(0x4D)];

/// (MIME type, accepted signatures)
const SIGNATURES: &[(&str, &[Pattern])] = &[
    ("image/jpeg", &[JPEG]),
    ("image/jpg", &[JPEG]),
    ("image/png", &[PNG]),
    ("image/gif", &[GIF87A, GIF89A]),
    ("image/webp", &[WEBP]),
    ("image/bmp", &[BMP]),
];

fn signatures_for(mime: &str) -> Option<&'static [Pattern]> {
    SIGNATURES
        .iter()
        .find(|(candidate, _)| *candidate == mime)
        .map(|(_, patterns)| *patterns)
}

/// Every byte present in both `data` and `pattern` agrees.
fn agrees(data: &[u8], pattern: &[Option<u8>]) -> bool {
    pattern
        .iter()
        .zip(data)
        .all(|(expected, actual)| expected.map_or(true, |b| b == *actual))
}

fn matches(data: &[u8], pattern: &[Option<u8>]) -> bool {
    data.len() >= pattern.len() && agrees(data, pattern)
}

/// `data` is too short for `pattern` but consistent with its start.
fn is_truncated(data: &[u8], pattern: &[Option<u8>]) -> bool {
    data.len() < pattern.len() && agrees(data, pattern)
}

/// Sniff the actual image format from the signature table.
pub fn detect_image_mime(data: &[u8]) -> Option<&'static str> {
    SIGNATURES
        .iter()
        // "image/jpg" is an alias; report the canonical name
        .filter(|(mime, _)| *mime != "image/jpg")
        .find(|(_, patterns)| patterns.iter().any(|p| matches(data, p)))
        .map(|(mime, _)| *mime)
}

/// Check that `data` starts with a signature of `claimed_mime`.
pub fn validate_image_magic_bytes(data: &[u8], claimed_mime: &str) -> Result<(), IngestError> {
    let claimed = normalize_mime_type(claimed_mime);
    let patterns =
        signatures_for(&claimed).ok_or_else(|| IngestError::UnsupportedSignature(claimed.clone()))?;

    if patterns.iter().any(|p| matches(data, p)) {
        return Ok(());
    }

    if patterns.iter().any(|p| is_truncated(data, p)) {
        return Err(IngestError::TruncatedSignature(claimed));
    }

    warn!(
        claimed = %claimed,
        detected = ?detect_image_mime(data),
        "Image signature mismatch, first bytes: {:02X?}",
        &data[..data.len().min(12)]
    );
    Err(IngestError::SignatureMismatch(claimed))
}
