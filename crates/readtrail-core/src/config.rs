//! Configuration module
//!
//! Settings for the image ingestion pipeline, loaded from the environment
//! (and an optional `.env` file).

use std::env;
use std::time::Duration;

// Common constants
pub const FETCH_TIMEOUT_MS: u64 = 30_000;
pub const SIZE_WARN_THRESHOLD_KB: u64 = 256;
pub const MAX_IMAGE_SIZE_KB: u64 = 512;

/// Ingestion pipeline configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
    /// Upper bound on send + body read, in milliseconds
    pub fetch_timeout_ms: u64,
    /// Sizes strictly above this succeed with a warning
    pub size_warn_threshold_kb: u64,
    /// Sizes strictly above this fail and recommend the link fallback
    pub max_image_size_kb: u64,
    pub user_agent: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            size_warn_threshold_kb: SIZE_WARN_THRESHOLD_KB,
            max_image_size_kb: MAX_IMAGE_SIZE_KB,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("readtrail/{}", env!("CARGO_PKG_VERSION"))
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse::<u64>()
        .unwrap_or(default)
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let user_agent = env::var("READTRAIL_USER_AGENT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_user_agent);

        let config = Self {
            fetch_timeout_ms: env_u64("READTRAIL_FETCH_TIMEOUT_MS", FETCH_TIMEOUT_MS),
            size_warn_threshold_kb: env_u64("READTRAIL_SIZE_WARN_KB", SIZE_WARN_THRESHOLD_KB),
            max_image_size_kb: env_u64("READTRAIL_SIZE_MAX_KB", MAX_IMAGE_SIZE_KB),
            user_agent,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.fetch_timeout_ms == 0 {
            return Err(anyhow::anyhow!(
                "READTRAIL_FETCH_TIMEOUT_MS must be greater than zero"
            ));
        }

        if self.max_image_size_kb == 0 {
            return Err(anyhow::anyhow!(
                "READTRAIL_SIZE_MAX_KB must be greater than zero"
            ));
        }

        if self.size_warn_threshold_kb > self.max_image_size_kb {
            return Err(anyhow::anyhow!(
                "READTRAIL_SIZE_WARN_KB ({}) cannot exceed READTRAIL_SIZE_MAX_KB ({})",
                self.size_warn_threshold_kb,
                self.max_image_size_kb
            ));
        }

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ingestion_limits() {
        let config = IngestConfig::default();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.size_warn_threshold_kb, 256);
        assert_eq!(config.max_image_size_kb, 512);
        assert!(config.user_agent.starts_with("readtrail/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = IngestConfig {
            fetch_timeout_ms: 0,
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_warn_above_max() {
        let config = IngestConfig {
            size_warn_threshold_kb: 600,
            ..IngestConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("READTRAIL_SIZE_WARN_KB"));
    }

    #[test]
    fn validate_accepts_equal_thresholds() {
        let config = IngestConfig {
            size_warn_threshold_kb: 512,
            ..IngestConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
