use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use satcat_io::Source;
use satcat_recon::TableNames;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use satcat_recon::pipeline::DEFAULT_BATCH_SIZE;

pub const DEFAULT_REGISTRY_SOURCE: &str = "https://s3.amazonaws.com/ucs-documents/nuclear-weapons/sat-database/5-9-19-update/UCS_Satellite_Database_4-1-2019.txt";
pub const DEFAULT_CATALOG_SOURCE: &str = "https://www.celestrak.com/pub/satcat.txt";
pub const DEFAULT_DATABASE: &str = "satcat.db";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// `satcat` run configuration. Every key is optional; an empty file yields
/// [`PipelineConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub registry: RegistryConfig,
    pub catalog: CatalogConfig,
    pub database: DatabaseConfig,
    pub tables: TableNames,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Local path or `http(s)` URL of the tab-delimited registry export.
    pub source: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_REGISTRY_SOURCE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Local path or `http(s)` URL of the fixed-width tracking catalog.
    pub source: String,
    /// Leading lines to skip before the first record.
    pub header_lines: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_CATALOG_SOURCE.into(),
            header_lines: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub batch_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading + validation
// ---------------------------------------------------------------------------

impl PipelineConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file. Relative paths inside it are taken
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&input)?;
        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// `<config_dir>/satcat/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("satcat").join("config.toml"))
    }

    /// Load `path` if given, else the default file if it exists, else the
    /// built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => Self::load(&default),
            _ => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.source.trim().is_empty() {
            return Err(ConfigError::Validation("registry.source must not be empty".into()));
        }
        if self.catalog.source.trim().is_empty() {
            return Err(ConfigError::Validation("catalog.source must not be empty".into()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("database.path must not be empty".into()));
        }
        if self.database.batch_size == 0 {
            return Err(ConfigError::Validation(
                "database.batch_size must be greater than 0".into(),
            ));
        }

        let tables = [
            ("tables.registry", &self.tables.registry),
            ("tables.catalog", &self.tables.catalog),
            ("tables.reconciled", &self.tables.reconciled),
        ];
        let mut seen = HashSet::new();
        for (key, name) in tables {
            if !is_identifier(name) {
                return Err(ConfigError::Validation(format!(
                    "{key}: '{name}' is not a valid table name"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{key}: table '{name}' is used more than once"
                )));
            }
        }

        Ok(())
    }

    fn resolve_relative(&mut self, base: &Path) {
        resolve_source(&mut self.registry.source, base);
        resolve_source(&mut self.catalog.source, base);
        if self.database.path.is_relative() {
            self.database.path = base.join(&self.database.path);
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn resolve_source(source: &mut String, base: &Path) {
    *source = Source::parse(source.as_str()).resolve_against(base).to_string();
}
