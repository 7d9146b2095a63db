//! Layered service settings: command-line flags, then environment, then
//! `resxlate.toml`, then built-in defaults.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use resx_translator::ServiceConfig;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "resxlate.toml";
pub const KEY_ENV: &str = "RESXLATE_KEY";
pub const REGION_ENV: &str = "RESXLATE_REGION";
pub const ENDPOINT_ENV: &str = "RESXLATE_ENDPOINT";

/// Contents of `resxlate.toml`.
///
/// ```toml
/// [service]
/// key = "..."
/// region = "westeurope"
/// endpoint = "https://api.cognitive.microsofttranslator.com"
/// timeout-secs = 30
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub service: ServiceSection,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ServiceSection {
    pub key: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line. clap fills these from the environment
/// when the flag itself is absent, so they already carry flag-over-env priority.
#[derive(Debug, Default, Clone)]
pub struct ServiceOverrides {
    pub key: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid config file: {}", e))
    }

    /// Loads `path`, or `resxlate.toml` from the working directory if no path is given.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }
}

/// Merges the layers into the library's [`ServiceConfig`].
pub fn resolve_service_config(overrides: &ServiceOverrides, file: &FileConfig) -> ServiceConfig {
    let section = &file.service;
    let pick = |flag: &Option<String>, file: &Option<String>| -> Option<String> {
        flag.clone()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file.clone())
    };

    let mut config = ServiceConfig::new(
        pick(&overrides.key, &section.key).unwrap_or_default(),
        pick(&overrides.region, &section.region).unwrap_or_default(),
    );
    if let Some(endpoint) = pick(&overrides.endpoint, &section.endpoint) {
        config = config.with_endpoint(endpoint);
    }
    if let Some(secs) = section.timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    config
}
