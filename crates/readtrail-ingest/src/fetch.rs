//! Network stage: one bounded GET per image.

use async_trait::async_trait;
use readtrail_core::models::FetchOutcome;
use readtrail_core::{IngestConfig, IngestError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::error::Error as _;
use std::time::Duration;

/// Retrieves the raw bytes behind an image URL.
///
/// Implementations must return every expected failure (non-2xx status,
/// unreachable host, timeout) as an `IngestError` rather than panicking.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &Url) -> Result<FetchOutcome, IngestError>;
}

/// `reqwest`-backed fetcher with a hard bound on send + body read.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &IngestConfig) -> Result<Self, IngestError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| IngestError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.fetch_timeout(),
        })
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    fn classify(&self, err: reqwest::Error) -> IngestError {
        if err.is_timeout() {
            return IngestError::Timeout {
                after_ms: self.timeout_ms(),
            };
        }

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        IngestError::Network(message)
    }

    async fn fetch_unbounded(&self, url: &Url) -> Result<FetchOutcome, IngestError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "image/*")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Http {
                status: status.as_u16(),
            });
        }

        let declared_content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let raw_bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(FetchOutcome {
            http_status: status.as_u16(),
            declared_content_type,
            raw_bytes,
        })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch_bytes(&self, url: &Url) -> Result<FetchOutcome, IngestError> {
        // The timer lives inside this future and is dropped with it on every path.
        match tokio::time::timeout(self.timeout, self.fetch_unbounded(url)).await {
            Ok(result) => {
                if let Ok(outcome) = &result {
                    tracing::debug!(
                        status = outcome.http_status,
                        content_type = ?outcome.declared_content_type,
                        bytes = outcome.raw_bytes.len(),
                        "Fetched image bytes"
                    );
                }
                result
            }
            Err(_) => Err(IngestError::Timeout {
                after_ms: self.timeout_ms(),
            }),
        }
    }
}
