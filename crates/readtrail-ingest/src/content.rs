//! Content validator: MIME → size → magic bytes, stopping at the first failure.

use readtrail_core::models::ValidatedContent;
use readtrail_core::IngestError;

use crate::magic::validate_image_magic_bytes;
use crate::mime::validate_mime_type;
use crate::size::SizePolicy;

pub fn validate_content(
    declared_content_type: Option<&str>,
    data: &[u8],
    policy: &SizePolicy,
) -> Result<ValidatedContent, IngestError> {
    let mime_type = validate_mime_type(declared_content_type)?;
    let size = policy.check(data.len())?;
    validate_image_magic_bytes(data, &mime_type)?;

    Ok(ValidatedContent { mime_type, size })
}
