use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Where the upstream weather API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_version: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_version: "2.5".to_string(),
        }
    }
}

/// Process-wide gateway configuration, resolved once at startup.
///
/// Example TOML:
/// ```toml
/// port = 8080
///
/// [provider]
/// base_url = "https://api.openweathermap.org"
/// api_version = "2.5"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Usually supplied through `OPENWEATHER_API_KEY` rather than the file.
    pub api_key: String,
    pub port: u16,
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            port: 8080,
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from the platform config file when no path is given.
    ///
    /// An explicit path must exist. The platform file is optional; without it
    /// the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::config_file_path()?;
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the platform config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-gateway")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the API key when one was given on the command line or in the environment.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Returns the API key, failing when none was configured.
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(anyhow!(
                "OPENWEATHER_API_KEY is not set in environment variables"
            ));
        }
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_openweather() {
        let cfg = Config::default();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.provider.base_url, "https://api.openweathermap.org");
        assert_eq!(cfg.provider.api_version, "2.5");
        assert!(cfg.api_key.is_empty());
    }

    #[test]
    fn require_api_key_errors_when_not_set() {
        let err = Config::default().require_api_key().unwrap_err();
        assert!(err.to_string().contains("OPENWEATHER_API_KEY is not set"));

        let blank = Config::default().with_api_key(Some("   ".into()));
        assert!(blank.require_api_key().is_err());
    }

    #[test]
    fn api_key_override_replaces_file_value() {
        let cfg = Config {
            api_key: "FROM_FILE".into(),
            ..Default::default()
        };

        let kept = cfg.clone().with_api_key(None);
        assert_eq!(kept.require_api_key().expect("key must exist"), "FROM_FILE");

        let replaced = cfg.with_api_key(Some("FROM_ENV".into()));
        assert_eq!(replaced.require_api_key().expect("key must exist"), "FROM_ENV");
    }

    #[test]
    fn port_override() {
        let cfg = Config::default().with_port(Some(9090));
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.with_port(None).port, 9090);
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "port = 3000\n\n[provider]\nbase_url = \"http://localhost:9000\"")
            .expect("write config");

        let cfg = Config::load(Some(file.path())).expect("config should parse");

        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.provider.base_url, "http://localhost:9000");
        assert_eq!(cfg.provider.api_version, "2.5");
        assert!(cfg.api_key.is_empty());
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "port = \"not a number\"").expect("write config");

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
