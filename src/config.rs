//! Configuration - JSON Settings File

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::assets::UrlStyle;
use crate::cookies::{CookieError, CookieSigner};
use crate::templates::TemplateRoots;
use crate::SCHEMA_VERSION;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid schema version: {0}")]
    InvalidSchemaVersion(String),

    #[error("Config schema {found} is not supported, current is {supported}")]
    UnsupportedSchema { found: String, supported: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternlibConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    #[serde(default)]
    pub template_roots: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub url_style: UrlStyle,
    #[serde(default)]
    pub cookie_validation_key: Option<String>,
}

fn default_schema_version() -> String { SCHEMA_VERSION.to_string() }
fn default_base_path() -> PathBuf { PathBuf::from(".") }

impl Default for PatternlibConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_path: default_base_path(),
            template_roots: BTreeMap::new(),
            url_style: UrlStyle::default(),
            cookie_validation_key: None,
        }
    }
}

impl PatternlibConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check_schema_version()?;
        debug!(path = %path.display(), schema = %config.schema_version, "loaded config");
        Ok(config)
    }

    /// Same major version as this build, and not newer.
    pub fn check_schema_version(&self) -> Result<(), ConfigError> {
        let found = semver::Version::parse(&self.schema_version)
            .map_err(|_| ConfigError::InvalidSchemaVersion(self.schema_version.clone()))?;
        let supported = semver::Version::parse(SCHEMA_VERSION)
            .map_err(|_| ConfigError::InvalidSchemaVersion(SCHEMA_VERSION.to_string()))?;

        if found.major != supported.major || found > supported {
            return Err(ConfigError::UnsupportedSchema {
                found: self.schema_version.clone(),
                supported: SCHEMA_VERSION.to_string(),
            });
        }

        Ok(())
    }

    /// Default roots for `base_path`, with configured overrides on top.
    pub fn template_roots(&self) -> TemplateRoots {
        let mut roots = TemplateRoots::defaults(&self.base_path);
        for (alias, path) in &self.template_roots {
            let path = if path.is_relative() { self.base_path.join(path) } else { path.clone() };
            roots.register(alias.clone(), path);
        }
        roots
    }

    pub fn cookie_signer(&self) -> Result<Option<CookieSigner>, CookieError> {
        self.cookie_validation_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(CookieSigner::new)
            .transpose()
    }
}
