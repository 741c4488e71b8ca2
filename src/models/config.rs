//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pricing catalog query settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Exact-match filters applied to every product query
    #[serde(default = "defaults::filters")]
    pub filters: BTreeMap<String, String>,

    /// Default file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is not worth a warning; an unreadable one is.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path,
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.service_code.trim().is_empty() {
            return Err(AppError::validation("catalog.service_code is empty"));
        }
        if self.catalog.format_version.trim().is_empty() {
            return Err(AppError::validation("catalog.format_version is empty"));
        }
        if self.catalog.region.trim().is_empty() {
            return Err(AppError::validation("catalog.region is empty"));
        }
        if self.filters.is_empty() {
            return Err(AppError::validation("No filters defined"));
        }
        for (field, value) in &self.filters {
            if field.trim().is_empty() {
                return Err(AppError::validation("Filter with empty field name"));
            }
            if value.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Filter '{field}' has an empty value"
                )));
            }
        }
        if self.paths.dump_file.trim().is_empty() {
            return Err(AppError::validation("paths.dump_file is empty"));
        }
        if self.paths.database_file.trim().is_empty() {
            return Err(AppError::validation("paths.database_file is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            filters: defaults::filters(),
            paths: PathsConfig::default(),
        }
    }
}

/// Pricing catalog query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Service code the products belong to
    #[serde(default = "defaults::service_code")]
    pub service_code: String,

    /// Price list format version
    #[serde(default = "defaults::format_version")]
    pub format_version: String,

    /// Region hosting the pricing API endpoint
    #[serde(default = "defaults::region")]
    pub region: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            service_code: defaults::service_code(),
            format_version: defaults::format_version(),
            region: defaults::region(),
        }
    }
}

/// Default input/output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Raw JSON dump written by `download` and read by `build`
    #[serde(default = "defaults::dump_file")]
    pub dump_file: String,

    /// SQLite database built by `build`
    #[serde(default = "defaults::database_file")]
    pub database_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dump_file: defaults::dump_file(),
            database_file: defaults::database_file(),
        }
    }
}

mod defaults {
    use std::collections::BTreeMap;

    // Catalog defaults
    pub fn service_code() -> String {
        "AmazonEC2".into()
    }
    pub fn format_version() -> String {
        "aws_v1".into()
    }
    pub fn region() -> String {
        "us-east-1".into()
    }

    // Linux, shared tenancy, on-demand capacity that is actually in use
    pub fn filters() -> BTreeMap<String, String> {
        [
            ("operatingSystem", "Linux"),
            ("vpcnetworkingsupport", "true"),
            ("marketoption", "OnDemand"),
            ("tenancy", "Shared"),
            ("capacitystatus", "Used"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    // Path defaults
    pub fn dump_file() -> String {
        "prices.json".into()
    }
    pub fn database_file() -> String {
        "prices.db".into()
    }
}
