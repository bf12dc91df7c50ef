//! Layered config loading: defaults, then an optional TOML file, then
//! `.env`, then the process environment. Later layers win.

pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants::env;
use crate::models::CatalogConfig;
use crate::models::sources::{EnvConfig, FileConfig};
use crate::util::non_empty;
use error::ConfigLoadError;

/// A layer that contributed to the effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
    EnvFile(PathBuf),
    Environment,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CatalogConfig,
    pub sources: Vec<ConfigSource>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    env_vars: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// TOML file to read. Without one, `CINELIST_CONFIG` is consulted.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Explicit dotenv file. Without one, `./.env` is used when present.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Replaces the process environment with a fixed set of variables.
    pub fn with_env_vars<K, V>(
        mut self,
        vars: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut config = CatalogConfig::default();
        let mut sources = vec![ConfigSource::Defaults];

        let (vars, env_file) = self.environment()?;

        let config_path = self.config_path.clone().or_else(|| {
            non_empty(vars.get(env::CONFIG_PATH).map(String::as_str))
                .map(PathBuf::from)
        });
        if let Some(path) = config_path {
            let file = read_file_config(&path)?;
            file.apply(&mut config)?;
            info!("Loaded catalog config from {}", path.display());
            sources.push(ConfigSource::File(path));
        }

        if let Some(path) = env_file {
            sources.push(ConfigSource::EnvFile(path));
        }

        let env_config = EnvConfig::from_vars(&vars)?;
        if !env_config.is_empty() {
            env_config.apply(&mut config);
            sources.push(ConfigSource::Environment);
        }

        config.validate()?;
        debug!(
            api_url = %config.api_url,
            viewer = %config.viewer_id,
            trending_limit = config.trending_limit,
            "Catalog config resolved"
        );

        Ok(ConfigLoad { config, sources })
    }

    /// Dotenv entries overlaid by the (real or injected) environment. The
    /// environment wins, as with `dotenvy::dotenv`.
    fn environment(
        &self,
    ) -> Result<(HashMap<String, String>, Option<PathBuf>), ConfigLoadError> {
        let mut vars = HashMap::new();

        let env_file = match &self.env_file {
            Some(path) => {
                read_env_file(path, &mut vars)?;
                Some(path.clone())
            }
            None if self.env_vars.is_none() => {
                let path = PathBuf::from(".env");
                if path.is_file() {
                    read_env_file(&path, &mut vars)?;
                    Some(path)
                } else {
                    None
                }
            }
            None => None,
        };

        match &self.env_vars {
            Some(injected) => vars.extend(injected.clone()),
            None => vars.extend(std::env::vars()),
        }

        Ok((vars, env_file))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn read_env_file(
    path: &Path,
    vars: &mut HashMap<String, String>,
) -> Result<(), ConfigLoadError> {
    let to_error = |source| ConfigLoadError::EnvFile {
        path: path.to_path_buf(),
        source,
    };
    for entry in dotenvy::from_path_iter(path).map_err(to_error)? {
        let (key, value) = entry.map_err(to_error)?;
        vars.insert(key, value);
    }
    Ok(())
}
