use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COVER_FILENAME: &str = "cover";

/// A request to ingest one remote image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub url: String,
    #[serde(default)]
    pub desired_filename: String,
}

impl ImageRequest {
    pub fn new(url: impl Into<String>, desired_filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            desired_filename: desired_filename.into(),
        }
    }

    /// Base filename with the `cover` default applied to an empty name.
    /// Whitespace is kept; sanitization replaces it later.
    pub fn filename_or_default(&self) -> &str {
        if self.desired_filename.is_empty() {
            DEFAULT_COVER_FILENAME
        } else {
            &self.desired_filename
        }
    }
}

/// Raw result of the network stage, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub http_status: u16,
    pub declared_content_type: Option<String>,
    pub raw_bytes: Bytes,
}

/// Success value of the size gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeCheck {
    #[serde(rename = "sizeInKB")]
    pub size_in_kb: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Output of the three content gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContent {
    pub mime_type: String,
    pub size: SizeCheck,
}

/// A validated image ready to be stored by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFile {
    pub data: Bytes,
    pub mime_type: String,
    pub filename: String,
}

impl IngestedFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            mime_type: self.mime_type.clone(),
            filename: self.filename.clone(),
            size: self.data.len(),
        }
    }
}

/// Serializable description of an `IngestedFile` without its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub mime_type: String,
    pub filename: String,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filename_defaults_to_cover() {
        assert_eq!(ImageRequest::new("https://a/b.jpg", "").filename_or_default(), "cover");
        assert_eq!(ImageRequest::new("https://a/b.jpg", "   ").filename_or_default(), "   ");
        assert_eq!(
            ImageRequest::new("https://a/b.jpg", " my cover ").filename_or_default(),
            " my cover "
        );
        assert_eq!(ImageRequest::new("https://a/b.jpg", "dune").filename_or_default(), "dune");
    }

    #[test]
    fn request_deserializes_without_filename() {
        let request: ImageRequest =
            serde_json::from_str(r#"{"url":"https://example.com/c.png"}"#).unwrap();
        assert_eq!(request.desired_filename, "");
        assert_eq!(request.filename_or_default(), "cover");
    }

    #[test]
    fn summary_omits_bytes() {
        let file = IngestedFile {
            data: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0]),
            mime_type: "image/jpeg".to_string(),
            filename: "cover.jpg".to_string(),
        };
        let json = serde_json::to_value(file.summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"mimeType": "image/jpeg", "filename": "cover.jpg", "size": 4})
        );
    }
}
