//! Configuration management for NCEP Fetcher
//!
//! This module provides TOML configuration loading with zero-config defaults.
//! Settings are read from the first file found in the standard locations, or
//! from an explicit `--config` path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, DownloadConfig};
use crate::constants::{files, http, limits, logging, ncep, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Project-local config file name
const LOCAL_CONFIG_FILE: &str = "ncep-fetcher.toml";

/// Directory under the user config dir
const CONFIG_DIR_NAME: &str = "ncep-fetcher";

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Archive locations
    pub archive: ArchiveConfig,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Batch download settings
    pub download: DownloadConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the archive and product pages live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Bulk-data host holding the provider trees
    pub base_url: String,
    /// Product browse mirror
    pub site_url: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: ncep::ARCHIVE_BASE_URL.to_string(),
            site_url: ncep::SITE_BASE_URL.to_string(),
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            user_agent: http::USER_AGENT.to_string(),
        }
    }
}

/// TOML-friendly download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfigToml {
    /// Files downloaded at the same time (1 = serial)
    pub concurrency: usize,
    /// Write buffer size in bytes
    pub chunk_size: usize,
}

impl Default for DownloadConfigToml {
    fn default() -> Self {
        Self {
            concurrency: workers::DEFAULT_CONCURRENCY,
            chunk_size: files::DOWNLOAD_CHUNK_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise the standard locations are
    /// searched and the defaults are used when none holds a file.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        let config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(format!("./{}", LOCAL_CONFIG_FILE))];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.client.rate_limit_rps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.rate_limit_rps".to_string(),
                value: "0".to_string(),
                reason: "Rate limit must be at least 1".to_string(),
            });
        }
        if self.download.concurrency == 0 || self.download.concurrency > workers::MAX_CONCURRENCY {
            return Err(ConfigError::InvalidValue {
                field: "download.concurrency".to_string(),
                value: self.download.concurrency.to_string(),
                reason: format!("Must be between 1 and {}", workers::MAX_CONCURRENCY),
            });
        }
        if self.download.chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "download.chunk_size".to_string(),
                value: "0".to_string(),
                reason: "Chunk size must be at least 1 byte".to_string(),
            });
        }
        Ok(())
    }

    /// Runtime HTTP client configuration
    pub fn client_config(&self) -> ClientConfig {
        self.client.to_runtime_config()
    }

    /// Runtime download configuration
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig {
            concurrency: self.download.concurrency,
            chunk_size: self.download.chunk_size,
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            rate_limit_rps: self.rate_limit_rps,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.archive.base_url, ncep::ARCHIVE_BASE_URL);
        assert_eq!(config.client.request_timeout_secs, 60);
        assert_eq!(config.download.concurrency, 1);
        assert_eq!(config.download.chunk_size, 64 * 1024);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
[archive]
base_url = "http://mirror.test/com/"

[download]
concurrency = 4
"#,
        )
        .await
        .unwrap();

        let config = AppConfig::load(Some(path)).await.unwrap();
        assert_eq!(config.archive.base_url, "http://mirror.test/com/");
        assert_eq!(config.archive.site_url, ncep::SITE_BASE_URL);
        assert_eq!(config.download.concurrency, 4);
        assert_eq!(config.download.chunk_size, files::DOWNLOAD_CHUNK_SIZE);
        assert_eq!(config.client.rate_limit_rps, limits::DEFAULT_RATE_LIMIT_RPS);
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(temp_dir.path().join("absent.toml"))).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "[download\nconcurrency = ").await.unwrap();
        let result = AppConfig::load(Some(path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "[download]\nconcurrency = 0\n").await.unwrap();
        let result = AppConfig::load(Some(path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_runtime_conversion() {
        let config = AppConfig::default();
        let client = config.client_config();
        assert_eq!(client.request_timeout, Duration::from_secs(60));
        assert_eq!(client.connect_timeout, Duration::from_secs(30));
        let download = config.download_config();
        assert_eq!(download.concurrency, 1);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("[archive]"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.download.chunk_size, config.download.chunk_size);
    }
}
