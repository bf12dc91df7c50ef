pub mod sources;

use std::time::Duration;

use cinelist_model::ViewerId;
use url::Url;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TRENDING_LIMIT,
    DEFAULT_VIEWER_ID,
};
use crate::loader::error::ConfigLoadError;

/// Effective client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Base URL of the catalog API; the movie resource lives at `/movies`.
    pub api_url: Url,
    pub request_timeout: Duration,
    /// Identity used for every favorites / continue-watching lookup.
    pub viewer_id: ViewerId,
    /// Upper bound on the trending list.
    pub trending_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            viewer_id: ViewerId::new(DEFAULT_VIEWER_ID),
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(ConfigLoadError::invalid(
                "api_url",
                format!("unsupported scheme {:?}", self.api_url.scheme()),
            ));
        }
        if self.api_url.cannot_be_a_base() {
            return Err(ConfigLoadError::invalid(
                "api_url",
                "URL cannot be used as a base",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigLoadError::invalid(
                "request_timeout",
                "must be greater than zero",
            ));
        }
        if self.trending_limit == 0 {
            return Err(ConfigLoadError::invalid(
                "trending_limit",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CatalogConfig::default();
        config.validate().unwrap();
        assert_eq!(config.viewer_id, ViewerId(1));
        assert_eq!(config.trending_limit, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(300));
    }

    #[test]
    fn rejects_non_http_urls() {
        let config = CatalogConfig {
            api_url: Url::parse("ftp://example.com").unwrap(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
