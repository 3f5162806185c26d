//! Ingestion pipeline: URL → fetch → MIME → size → magic bytes → file.
//!
//! `ImageIngestor` is the context object the pipeline runs in. It owns the
//! configuration and the fetcher, holds no mutable state, and can be cloned
//! freely to run independent ingestions in parallel.

use std::sync::Arc;

use readtrail_core::models::{ImageRequest, IngestReport, IngestSuccess};
use readtrail_core::{ErrorMetadata, IngestConfig, IngestError, LogLevel};

use crate::assemble::build_file;
use crate::content::validate_content;
use crate::fetch::{HttpFetcher, ImageFetcher};
use crate::size::SizePolicy;
use crate::url::parse_image_url;

#[derive(Clone)]
pub struct ImageIngestor {
    config: IngestConfig,
    size_policy: SizePolicy,
    fetcher: Arc<dyn ImageFetcher>,
}

impl std::fmt::Debug for ImageIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageIngestor")
            .field("config", &self.config)
            .field("size_policy", &self.size_policy)
            .finish_non_exhaustive()
    }
}

impl ImageIngestor {
    /// Create an ingestor that fetches over HTTP.
    pub fn new(config: IngestConfig) -> Result<Self, IngestError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: IngestConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            size_policy: SizePolicy::from(&config),
            config,
            fetcher,
        }
    }

    /// Create an ingestor from `READTRAIL_*` environment variables.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = IngestConfig::from_env()?;
        Ok(Self::new(config)?)
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    #[tracing::instrument(
        skip(self, request),
        fields(url = %request.url, filename = %request.filename_or_default())
    )]
    pub async fn ingest(&self, request: &ImageRequest) -> Result<IngestSuccess, IngestError> {
        let result = self.run(request).await;

        match &result {
            Ok(success) => {
                tracing::info!(
                    filename = %success.file.filename,
                    mime_type = %success.file.mime_type,
                    size = success.file.len(),
                    "Image ingested"
                );
                if let Some(warning) = &success.warning {
                    tracing::warn!(warning = %warning, "Image ingested with warning");
                }
            }
            Err(e) => log_failure(e),
        }

        result
    }

    /// Run the pipeline and return the outward `{ success, ... }` shape.
    pub async fn report(&self, request: &ImageRequest) -> IngestReport {
        IngestReport::from(&self.ingest(request).await)
    }

    async fn run(&self, request: &ImageRequest) -> Result<IngestSuccess, IngestError> {
        let url = parse_image_url(&request.url)?;
        let fetched = self.fetcher.fetch_bytes(&url).await?;

        let content = validate_content(
            fetched.declared_content_type.as_deref(),
            &fetched.raw_bytes,
            &self.size_policy,
        )?;

        let file = build_file(
            fetched.raw_bytes,
            Some(content.mime_type.as_str()),
            request.filename_or_default(),
            Some(&url),
        );

        Ok(IngestSuccess {
            file,
            warning: content.size.warning,
        })
    }
}

fn log_failure(err: &IngestError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, code, "Image ingestion rejected"),
        LogLevel::Warn => tracing::warn!(error = %err, code, "Image ingestion failed"),
        LogLevel::Error => tracing::error!(error = %err, code, "Image ingestion failed"),
    }
}

/// Fetch `url` with the default configuration and package it as `filename`.
pub async fn fetch_image_as_file(url: &str, filename: &str) -> Result<IngestSuccess, IngestError> {
    ImageIngestor::new(IngestConfig::default())?
        .ingest(&ImageRequest::new(url, filename))
        .await
}
