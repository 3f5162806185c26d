//! Size gate: second of the three content checks.

use readtrail_core::models::SizeCheck;
use readtrail_core::{IngestConfig, IngestError, MAX_IMAGE_SIZE_KB, SIZE_WARN_THRESHOLD_KB};

/// Bytes to KB, rounded to the nearest integer.
pub fn size_in_kb(len: usize) -> u64 {
    (len as u64 + 512) / 1024
}

/// Soft and hard size ceilings. Both boundaries are inclusive: a payload of
/// exactly `warn_threshold_kb` gets no warning and one of exactly
/// `max_size_kb` still passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicy {
    pub warn_threshold_kb: u64,
    pub max_size_kb: u64,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            warn_threshold_kb: SIZE_WARN_THRESHOLD_KB,
            max_size_kb: MAX_IMAGE_SIZE_KB,
        }
    }
}

impl From<&IngestConfig> for SizePolicy {
    fn from(config: &IngestConfig) -> Self {
        Self {
            warn_threshold_kb: config.size_warn_threshold_kb,
            max_size_kb: config.max_image_size_kb,
        }
    }
}

impl SizePolicy {
    pub fn check(&self, len: usize) -> Result<SizeCheck, IngestError> {
        let size_kb = size_in_kb(len);
        let len = len as u64;

        if len > self.max_size_kb.saturating_mul(1024) {
            return Err(IngestError::TooLarge {
                size_kb,
                max_kb: self.max_size_kb,
            });
        }

        let warning = (len > self.warn_threshold_kb.saturating_mul(1024)).then(|| {
            format!(
                "Image is {}KB, above the recommended {}KB; it may slow down syncing",
                size_kb, self.warn_threshold_kb
            )
        });

        Ok(SizeCheck {
            size_in_kb: size_kb,
            warning,
        })
    }
}

/// Validate a payload size against the 512KB ceiling and a warn threshold.
pub fn validate_file_size(len: usize, warn_threshold_kb: u64) -> Result<SizeCheck, IngestError> {
    SizePolicy {
        warn_threshold_kb,
        ..SizePolicy::default()
    }
    .check(len)
}
