use serde::{Deserialize, Serialize};

use super::image::{FileSummary, IngestedFile, SizeCheck, ValidatedContent};
use crate::error::{ErrorMetadata, IngestError};

/// Flat, serializable view of one validation gate's result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub valid: bool,
    pub normalized_mime_type: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    #[serde(rename = "sizeInKB")]
    pub size_in_kb: Option<u64>,
    pub use_fallback: bool,
}

impl ValidationVerdict {
    pub fn passed() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    pub fn failed(err: &IngestError) -> Self {
        Self {
            valid: false,
            error: Some(err.to_string()),
            size_in_kb: err.size_in_kb(),
            use_fallback: err.use_fallback(),
            ..Self::default()
        }
    }
}

impl From<&Result<String, IngestError>> for ValidationVerdict {
    fn from(result: &Result<String, IngestError>) -> Self {
        match result {
            Ok(mime) => Self {
                normalized_mime_type: Some(mime.clone()),
                ..Self::passed()
            },
            Err(e) => Self::failed(e),
        }
    }
}

impl From<&Result<SizeCheck, IngestError>> for ValidationVerdict {
    fn from(result: &Result<SizeCheck, IngestError>) -> Self {
        match result {
            Ok(check) => Self {
                warning: check.warning.clone(),
                size_in_kb: Some(check.size_in_kb),
                ..Self::passed()
            },
            Err(e) => Self::failed(e),
        }
    }
}

impl From<&Result<(), IngestError>> for ValidationVerdict {
    fn from(result: &Result<(), IngestError>) -> Self {
        match result {
            Ok(()) => Self::passed(),
            Err(e) => Self::failed(e),
        }
    }
}

impl From<&Result<ValidatedContent, IngestError>> for ValidationVerdict {
    fn from(result: &Result<ValidatedContent, IngestError>) -> Self {
        match result {
            Ok(content) => Self {
                normalized_mime_type: Some(content.mime_type.clone()),
                warning: content.size.warning.clone(),
                size_in_kb: Some(content.size.size_in_kb),
                ..Self::passed()
            },
            Err(e) => Self::failed(e),
        }
    }
}

/// Terminal success value of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSuccess {
    pub file: IngestedFile,
    pub warning: Option<String>,
}

/// Outward `{ success, ... }` shape of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(rename = "sizeInKB", skip_serializing_if = "Option::is_none")]
    pub size_in_kb: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_fallback: Option<bool>,
}

impl From<&Result<IngestSuccess, IngestError>> for IngestReport {
    fn from(result: &Result<IngestSuccess, IngestError>) -> Self {
        match result {
            Ok(success) => Self {
                success: true,
                file: Some(success.file.summary()),
                warning: success.warning.clone(),
                error: None,
                error_code: None,
                size_in_kb: None,
                use_fallback: None,
            },
            Err(e) => Self {
                success: false,
                file: None,
                warning: None,
                error: Some(e.to_string()),
                error_code: Some(e.error_code().to_string()),
                size_in_kb: e.size_in_kb(),
                use_fallback: e.use_fallback().then_some(true),
            },
        }
    }
}

/// Where the caller keeps a book cover after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CoverSource {
    /// The validated bytes are stored
    Embedded {
        #[serde(flatten)]
        file: FileSummary,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    /// Only the source URL is stored
    Link {
        url: String,
        reason: String,
        #[serde(rename = "sizeInKB", skip_serializing_if = "Option::is_none")]
        size_in_kb: Option<u64>,
    },
}

impl CoverSource {
    /// Embed on success, fall back to a link when the failure recommends it.
    /// Any other failure is returned unchanged.
    pub fn decide(
        source_url: &str,
        result: &Result<IngestSuccess, IngestError>,
    ) -> Result<Self, IngestError> {
        match result {
            Ok(success) => Ok(CoverSource::Embedded {
                file: success.file.summary(),
                warning: success.warning.clone(),
            }),
            Err(e) if e.use_fallback() => Ok(CoverSource::Link {
                url: source_url.to_string(),
                reason: e.to_string(),
                size_in_kb: e.size_in_kb(),
            }),
            Err(e) => Err(e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn jpeg_success(warning: Option<&str>) -> IngestSuccess {
        IngestSuccess {
            file: IngestedFile {
                data: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0]),
                mime_type: "image/jpeg".to_string(),
                filename: "cover.jpg".to_string(),
            },
            warning: warning.map(str::to_string),
        }
    }

    #[test]
    fn verdict_from_size_failure_carries_fallback() {
        let result: Result<SizeCheck, IngestError> = Err(IngestError::TooLarge {
            size_kb: 600,
            max_kb: 512,
        });
        let verdict = ValidationVerdict::from(&result);
        assert!(!verdict.valid);
        assert!(verdict.use_fallback);
        assert_eq!(verdict.size_in_kb, Some(600));
        assert!(verdict.error.unwrap().contains("600KB"));
    }

    #[test]
    fn verdict_from_mime_success_carries_normalized_type() {
        let result: Result<String, IngestError> = Ok("image/png".to_string());
        let verdict = ValidationVerdict::from(&result);
        assert!(verdict.valid);
        assert_eq!(verdict.normalized_mime_type.as_deref(), Some("image/png"));
        assert!(verdict.error.is_none());
    }

    #[test]
    fn report_success_shape() {
        let report = IngestReport::from(&Ok(jpeg_success(None)));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["file"]["mimeType"], "image/jpeg");
        assert_eq!(json["file"]["filename"], "cover.jpg");
        assert!(json.get("error").is_none());
        assert!(json.get("useFallback").is_none());
    }

    #[test]
    fn report_failure_shape() {
        let report = IngestReport::from(&Err(IngestError::TooLarge {
            size_kb: 700,
            max_kb: 512,
        }));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["sizeInKB"], 700);
        assert_eq!(json["useFallback"], true);
        assert_eq!(json["errorCode"], "PAYLOAD_TOO_LARGE");

        let report = IngestReport::from(&Err(IngestError::Http { status: 404 }));
        assert_eq!(report.error.as_deref(), Some("HTTP error 404"));
        assert_eq!(report.use_fallback, None);
    }

    #[test]
    fn cover_source_falls_back_to_link_only_for_size() {
        let url = "https://covers.example.com/big.jpg";
        let oversized = Err(IngestError::TooLarge {
            size_kb: 900,
            max_kb: 512,
        });
        match CoverSource::decide(url, &oversized).unwrap() {
            CoverSource::Link {
                url: link,
                size_in_kb,
                ..
            } => {
                assert_eq!(link, url);
                assert_eq!(size_in_kb, Some(900));
            }
            other => panic!("expected link, got {:?}", other),
        }

        let not_found = Err(IngestError::Http { status: 404 });
        assert_eq!(
            CoverSource::decide(url, &not_found).unwrap_err(),
            IngestError::Http { status: 404 }
        );

        let embedded = CoverSource::decide(url, &Ok(jpeg_success(Some("big")))).unwrap();
        let json = serde_json::to_value(&embedded).unwrap();
        assert_eq!(json["kind"], "embedded");
        assert_eq!(json["filename"], "cover.jpg");
        assert_eq!(json["warning"], "big");
    }
}
