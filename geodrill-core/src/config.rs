//! Application configuration loaded from an optional TOML file.
//!
//! ```toml
//! [http]
//! timeout_secs = 30
//! user_agent = "geodrill/0.1"
//!
//! [log]
//! level = "debug"
//! file = "/tmp/geodrill.log"
//!
//! [sources]
//! india = ["https://mirror.example/india_states.geojson"]
//! ```
//!
//! Every section is optional. `[sources]` replaces a region's candidate URL
//! list; the catalog is fixed once built from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::{Catalog, RegionKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("[sources]: {0}")]
    UnknownRegion(#[from] crate::region::UnknownRegion),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("geodrill/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `geodrill_core=debug`.
    pub level: String,
    /// Log file for the terminal UI. Defaults to the user data directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub log: LogConfig,
    /// Region key → replacement candidate URLs.
    pub sources: BTreeMap<String, Vec<String>>,
}

impl AppConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.source_overrides()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// `[sources]` keyed by region.
    pub fn source_overrides(&self) -> Result<BTreeMap<RegionKey, Vec<String>>, ConfigError> {
        self.sources
            .iter()
            .map(|(name, urls)| -> Result<_, ConfigError> {
                Ok((name.parse::<RegionKey>()?, urls.clone()))
            })
            .collect()
    }

    /// Built-in catalog with this config's source overrides applied.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Ok(Catalog::builtin().with_sources(&self.source_overrides()?))
    }

    /// Log file path, falling back to `<data dir>/geodrill/geodrill.log`.
    pub fn log_file(&self) -> PathBuf {
        self.log.file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("geodrill")
                .join("geodrill.log")
        })
    }
}

/// `<config dir>/geodrill/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("geodrill").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = AppConfig::from_toml("[http]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert!(config.http.user_agent.starts_with("geodrill/"));
    }

    #[test]
    fn source_overrides_resolve_region_keys() {
        let config = AppConfig::from_toml(
            r#"
            [sources]
            India = ["https://a.test/in.json", "https://b.test/in.json"]
            "#,
        )
        .unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.get(RegionKey::India).unwrap().sources.len(), 2);
        assert_eq!(catalog.get(RegionKey::World).unwrap().sources.len(), 2);
    }

    #[test]
    fn unknown_region_in_sources_is_rejected() {
        let err = AppConfig::from_toml("[sources]\nmars = [\"x\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRegion(_)));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[http\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/geodrill.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_log_file_wins() {
        let mut config = AppConfig::default();
        config.log.file = Some(PathBuf::from("/tmp/x.log"));
        assert_eq!(config.log_file(), PathBuf::from("/tmp/x.log"));
    }
}
