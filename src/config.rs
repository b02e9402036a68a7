//! Configuration module
//!
//! Page size limits are read from the `[pagination]` table of a TOML file:
//!
//! ```toml
//! [pagination]
//! default_page_size = 20
//! max_page_size = 100
//! ```
//!
//! `PAGINATION_DEFAULT_PAGE_SIZE` and `PAGINATION_MAX_PAGE_SIZE` override the
//! file values.

use std::env::VarError;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::shared::ConfigError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page size limits applied to caller-supplied pagination parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller gives none
    pub default_page_size: u64,
    /// Upper bound for caller-supplied page sizes
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pagination: PaginationConfig,
}

impl PaginationConfig {
    pub fn new(default_page_size: u64, max_page_size: u64) -> Result<Self, ConfigError> {
        let config = Self {
            default_page_size,
            max_page_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse the `[pagination]` table from TOML text.
    ///
    /// Environment overrides are not applied; use [`PaginationConfig::load`]
    /// or [`PaginationConfig::from_env`] for those.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name))
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name))
    }

    fn load_with<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?.with_overrides(lookup)?;
        config.validate()?;
        info!(
            path = %path.display(),
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            "Pagination config loaded"
        );
        Ok(config)
    }

    fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let config = Self::default().with_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.pagination)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        if let Some(size) = parse_override("PAGINATION_DEFAULT_PAGE_SIZE", &lookup)? {
            self.default_page_size = size;
        }
        if let Some(size) = parse_override("PAGINATION_MAX_PAGE_SIZE", &lookup)? {
            self.max_page_size = size;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "page sizes must be at least 1".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}

fn parse_override<F>(name: &'static str, lookup: &F) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidEnv {
            name,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}
