//! Configuration types for the newsfront server.

use newsfront_upstream::UpstreamConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{FrontError, Result};

/// Environment variable overriding `upstream.base_url`.
pub const ENV_UPSTREAM_URL: &str = "NEWSFRONT_UPSTREAM_URL";
/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "NEWSFRONT_PORT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Upstream company/news API settings.
    pub upstream: UpstreamConfig,
    /// Log filter settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind (0 = auto-assign).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where a loaded [`FrontConfig`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No file at this path; built-in defaults were used.
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults(path) => write!(f, "defaults ({} not found)", path.display()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "newsfront=info,newsfront_upstream=info".to_owned(),
        }
    }
}

impl FrontConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FrontError::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise return defaults.
    ///
    /// The returned [`ConfigSource`] records which one was used.
    pub fn from_file_or_default(path: &Path) -> Result<(Self, ConfigSource)> {
        if path.exists() {
            Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FrontError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/newsfront/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("newsfront").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("newsfront")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/newsfront-config/config.toml")
        }
    }

    /// Apply `NEWSFRONT_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = present(ENV_UPSTREAM_URL) {
            self.upstream.base_url = url.trim().to_owned();
        }
        if let Some(port) = present(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                FrontError::Config(format!("{ENV_PORT} `{port}` is not a valid port"))
            })?;
        }
        Ok(())
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`FrontError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(FrontError::Config("server.host must not be empty".into()));
        }
        self.upstream
            .validate()
            .map_err(|e| FrontError::Config(format!("upstream: {e}")))?;
        if self.logging.filter.trim().is_empty() {
            return Err(FrontError::Config("logging.filter must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = FrontConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.upstream.base_url, "http://localhost:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = FrontConfig::default();
        config.server.port = 4100;
        config.upstream.base_url = "https://news.example/api".into();
        config.upstream.user_agent = Some("newsfront-test/1.0".into());
        config.save_to_file(&path).unwrap();

        let loaded = FrontConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml_str = r#"
            [upstream]
            base_url = "http://10.0.0.5:8080"
        "#;
        let config: FrontConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.upstream.base_url, "http://10.0.0.5:8080");
        assert_eq!(config.upstream.timeout_seconds, 10);
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = FrontConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, FrontError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let (config, source) = FrontConfig::from_file_or_default(&path).unwrap();
        assert_eq!(config, FrontConfig::default());
        assert_eq!(source, ConfigSource::Defaults(path.clone()));
        assert!(source.to_string().contains("not found"));
    }

    #[test]
    fn existing_file_is_reported_as_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 4200\n").unwrap();

        let (config, source) = FrontConfig::from_file_or_default(&path).unwrap();
        assert_eq!(config.server.port, 4200);
        assert_eq!(source, ConfigSource::File(path.clone()));
        assert_eq!(source.to_string(), path.display().to_string());
    }

    #[test]
    fn overrides_replace_url_and_port() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_UPSTREAM_URL, "http://upstream:9000"),
            (ENV_PORT, " 8081 "),
        ]);
        let mut config = FrontConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.upstream.base_url, "http://upstream:9000");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let mut config = FrontConfig::default();
        config.apply_overrides(|_| Some(String::new())).unwrap();
        assert_eq!(config, FrontConfig::default());
    }

    #[test]
    fn bad_port_override_rejected() {
        let mut config = FrontConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_PORT).then(|| "http".to_owned()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }

    #[test]
    fn validate_reports_upstream_problems() {
        let mut config = FrontConfig::default();
        config.upstream.base_url = "not a url".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("upstream"));
    }

    #[test]
    fn validate_rejects_empty_host() {
        let mut config = FrontConfig::default();
        config.server.host = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = FrontConfig::default_config_path();
        assert!(path.ends_with("newsfront/config.toml"));
    }
}
