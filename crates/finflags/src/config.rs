//! Configuration management for finflags.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "finflags";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FINFLAGS_";

/// The analysis endpoint the page posts to.
pub const DEFAULT_UPLOAD_URL: &str = "https://annmarykarbon.onrender.com/upload";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FINFLAGS_`, `__` between levels)
/// 2. TOML config file at `~/.config/finflags/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis endpoint configuration.
    pub endpoint: EndpointConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Analysis endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Absolute URL the file is posted to.
    pub url: String,
    /// Request timeout in seconds. 0 waits forever.
    pub timeout_secs: u64,
}

/// Display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print submit failures to the user instead of only logging them.
    pub surface_errors: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPLOAD_URL.to_string(),
            timeout_secs: 0,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL does not parse or is not http(s).
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.endpoint.url).map_err(|e| Error::ConfigValidation {
            message: format!("invalid endpoint url '{}': {e}", self.endpoint.url),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigValidation {
                message: format!(
                    "endpoint url must use http or https, got '{}'",
                    url.scheme()
                ),
            });
        }

        Ok(())
    }

    /// Get the request timeout, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        if self.endpoint.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.endpoint.timeout_secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.endpoint.url, DEFAULT_UPLOAD_URL);
        assert_eq!(config.endpoint.timeout_secs, 0);
        assert!(!config.display.surface_errors);
    }

    #[test]
    fn test_default_has_no_timeout() {
        assert!(Config::default().timeout().is_none());
    }

    #[test]
    fn test_timeout_when_set() {
        let mut config = Config::default();
        config.endpoint.timeout_secs = 30;
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_unparseable_url() {
        let mut config = Config::default();
        config.endpoint.url = "not a url".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid endpoint url"));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.endpoint.url = "ftp://example.com/upload".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn test_validate_accepts_plain_http() {
        let mut config = Config::default();
        config.endpoint.url = "http://127.0.0.1:5000/upload".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("finflags"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[endpoint]\nurl = \"http://localhost:5000/upload\"\ntimeout_secs = 5\n\n[display]\nsurface_errors = true",
            )?;

            let config = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap();
            assert_eq!(config.endpoint.url, "http://localhost:5000/upload");
            assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
            assert!(config.display.surface_errors);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[endpoint]\nurl = \"http://localhost:5000/upload\"\ntimeout_secs = 5",
            )?;
            jail.set_env("FINFLAGS_ENDPOINT__URL", "http://127.0.0.1:8080/upload");
            jail.set_env("FINFLAGS_DISPLAY__SURFACE_ERRORS", "true");

            let config = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap();
            assert_eq!(config.endpoint.url, "http://127.0.0.1:8080/upload");
            assert_eq!(config.endpoint.timeout_secs, 5);
            assert!(config.display.surface_errors);
            Ok(())
        });
    }

    #[test]
    fn test_env_url_is_validated() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FINFLAGS_ENDPOINT__URL", "ftp://example.com/upload");

            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_file_url() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[endpoint]\nurl = \"file:///etc/passwd\"")?;

            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("timeout_secs"));
        assert!(json.contains("surface_errors"));
    }

    #[test]
    fn test_endpoint_config_deserialize_partial() {
        let endpoint: EndpointConfig = serde_json::from_str(r#"{"timeout_secs": 9}"#).unwrap();
        assert_eq!(endpoint.url, DEFAULT_UPLOAD_URL);
        assert_eq!(endpoint.timeout_secs, 9);
    }
}
