//! Registry client configuration.
//!
//! Defaults are built in; a YAML file or string is layered on top of them so
//! that every key is optional.

use crate::client::ClientConfig;
use crate::error::{Result, RegistryError};
use crate::quay::DEFAULT_API_URL;
use config::{Config as ConfigRs, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(test)]
mod tests;

/// Root configuration structure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub quay: Quay,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder()
            .add_source(Self::defaults()?)
            .add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads a `Config`, layering the file at `path` over the defaults.
    ///
    /// With no path the defaults are returned. A path that does not exist is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigRs::builder().add_source(Self::defaults()?);

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).required(true));
        }

        Self::from_builder(builder, path)
    }

    fn defaults() -> Result<ConfigRs> {
        ConfigRs::try_from(&Config::default()).map_err(|e| {
            RegistryError::config_with_source("Failed to build default configuration", None, e)
        })
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                RegistryError::config_with_source(
                    "Failed to deserialize configuration".to_string(),
                    path.map(|p| p.display().to_string()),
                    e,
                )
            })
    }
}

/// Network settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Hard per-request timeout in seconds. Unset by default so that the
    /// caller's context is the only bound on a request.
    #[serde(default)]
    pub timeout: Option<u64>,

    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            timeout: None,
            max_idle_per_host: default_max_idle_per_host(),
        }
    }
}

impl Network {
    /// HTTP client settings derived from this section.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new().with_max_idle_per_host(self.max_idle_per_host);
        match self.timeout {
            Some(seconds) => config.with_timeout(seconds),
            None => config,
        }
    }
}

fn default_max_idle_per_host() -> usize {
    10
}

/// quay.io client settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quay {
    #[serde(default = "default_quay_api_url")]
    pub api_url: String,
}

impl Default for Quay {
    fn default() -> Self {
        Self {
            api_url: default_quay_api_url(),
        }
    }
}

fn default_quay_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
