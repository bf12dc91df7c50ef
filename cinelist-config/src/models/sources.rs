use std::collections::HashMap;
use std::time::Duration;

use cinelist_model::ViewerId;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::env;
use crate::loader::error::ConfigLoadError;
use crate::util::{non_empty, parse_duration};

use super::CatalogConfig;

/// Raw configuration as defined in a TOML file.
///
/// ```toml
/// api_url = "http://localhost:3001"
/// request_timeout = "30s"
/// viewer_id = 1
/// trending_limit = 4
/// ```
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// humantime format, e.g. `"90s"` or `"5m"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_limit: Option<usize>,
}

impl FileConfig {
    pub fn is_empty(&self) -> bool {
        self.api_url.is_none()
            && self.request_timeout.is_none()
            && self.viewer_id.is_none()
            && self.trending_limit.is_none()
    }

    pub fn apply(&self, config: &mut CatalogConfig) -> Result<(), ConfigLoadError> {
        if let Some(raw) = non_empty(self.api_url.as_deref()) {
            config.api_url = parse_url("api_url", raw)?;
        }
        if let Some(raw) = non_empty(self.request_timeout.as_deref()) {
            config.request_timeout = parse_duration("request_timeout", raw)?;
        }
        if let Some(viewer) = self.viewer_id {
            config.viewer_id = ViewerId::new(viewer);
        }
        if let Some(limit) = self.trending_limit {
            config.trending_limit = limit;
        }
        Ok(())
    }
}

/// Values picked up from `.env` and the process environment.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvConfig {
    pub api_url: Option<Url>,
    pub request_timeout: Option<Duration>,
    pub viewer_id: Option<ViewerId>,
    pub trending_limit: Option<usize>,
}

impl EnvConfig {
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigLoadError> {
        let api_url = var(vars, env::API_URL)
            .map(|raw| parse_url(env::API_URL, raw))
            .transpose()?;
        let request_timeout = var(vars, env::REQUEST_TIMEOUT)
            .map(|raw| parse_duration(env::REQUEST_TIMEOUT, raw))
            .transpose()?;
        let viewer_id = var(vars, env::VIEWER_ID)
            .map(|raw| {
                raw.parse::<ViewerId>().map_err(|e| {
                    ConfigLoadError::invalid(env::VIEWER_ID, e.to_string())
                })
            })
            .transpose()?;
        let trending_limit = var(vars, env::TRENDING_LIMIT)
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigLoadError::invalid(env::TRENDING_LIMIT, e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            api_url,
            request_timeout,
            viewer_id,
            trending_limit,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, config: &mut CatalogConfig) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = timeout;
        }
        if let Some(viewer) = self.viewer_id {
            config.viewer_id = viewer;
        }
        if let Some(limit) = self.trending_limit {
            config.trending_limit = limit;
        }
    }
}

fn var<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    non_empty(vars.get(key).map(String::as_str))
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigLoadError> {
    Url::parse(raw).map_err(|e| ConfigLoadError::invalid(key, e.to_string()))
}
