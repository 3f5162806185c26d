//! Library side of the `readtrail` command: tracing setup and the caller-side
//! decisions the ingestion core leaves open (embed vs. link, where to write).

use std::path::{Path, PathBuf};

use anyhow::Context;
use readtrail_core::models::{CoverSource, IngestSuccess, ValidationVerdict};
use readtrail_core::IngestError;
use readtrail_ingest::{validate_content, SizePolicy};
use serde::Serialize;

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays
/// machine-readable; set `READTRAIL_LOG_FORMAT=json` for JSON lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("readtrail=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("READTRAIL_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.compact().with_target(false).init();
    }
}

/// Outcome of storing one cover.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCover {
    pub cover: CoverSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Write the ingested file into `out_dir`, or record a link when the pipeline
/// recommends the fallback. Other failures are returned as errors.
pub async fn store_cover(
    source_url: &str,
    result: &Result<IngestSuccess, IngestError>,
    out_dir: &Path,
) -> anyhow::Result<StoredCover> {
    let cover = CoverSource::decide(source_url, result)?;

    let path = match result {
        Ok(success) => {
            tokio::fs::create_dir_all(out_dir)
                .await
                .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;
            let path = out_dir.join(&success.file.filename);
            tokio::fs::write(&path, &success.file.data)
                .await
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            tracing::info!(path = %path.display(), "Cover written");
            Some(path)
        }
        Err(e) => {
            tracing::info!(url = %source_url, reason = %e, "Keeping a link instead of the image");
            None
        }
    };

    Ok(StoredCover { cover, path })
}

/// Run the content validator over a local file.
pub async fn inspect_file(
    path: &Path,
    content_type: &str,
    policy: &SizePolicy,
) -> anyhow::Result<ValidationVerdict> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(ValidationVerdict::from(&validate_content(
        Some(content_type),
        &data,
        policy,
    )))
}
