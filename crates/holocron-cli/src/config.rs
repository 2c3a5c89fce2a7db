//! Application configuration management.
//!
//! Configuration is stored at `~/.config/holocron/config.json`. Every field
//! is optional; missing values fall back to the public SWAPI endpoint, a 30
//! second request timeout, and `~/.cache/holocron/` for cached data.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use holocron_core::api::transport::DEFAULT_TIMEOUT_SECS;
use holocron_core::DEFAULT_BASE_URL;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "holocron";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "HOLOCRON_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the config file only if none exists yet. Returns whether it was written.
    pub fn init(&self) -> Result<bool> {
        self.init_at(&Self::config_path()?)
    }

    fn init_at(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        Ok(true)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Base URL with the environment override applied.
    pub fn base_url(&self) -> String {
        self.resolve_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }

        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolve_base_url(None), "https://swapi.dev/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            base_url: Some("https://swapi.py4e.com/api".to_string()),
            ..Default::default()
        };

        assert_eq!(config.resolve_base_url(None), "https://swapi.py4e.com/api");
        assert_eq!(
            config.resolve_base_url(Some("http://localhost:8000/api".to_string())),
            "http://localhost:8000/api"
        );
        assert_eq!(
            config.resolve_base_url(Some("  ".to_string())),
            "https://swapi.py4e.com/api"
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = serde_json::from_str(r#"{"request_timeout_secs": 5}"#).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("holocron").join(CONFIG_FILE);

        let first = Config {
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        assert!(first.init_at(&path).unwrap());

        let second = Config {
            request_timeout_secs: Some(60),
            ..Default::default()
        };
        assert!(!second.init_at(&path).unwrap());

        let on_disk: Config = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, first);
    }

    #[test]
    fn test_explicit_cache_dir_wins() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/tmp/holocron-test")),
            ..Default::default()
        };
        assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/tmp/holocron-test"));
    }
}
