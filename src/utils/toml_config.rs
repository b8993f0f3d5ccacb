//! TOML-based configuration for the Relay console
//!
//! Every field has a default, so a missing `relay.toml` still yields a usable
//! configuration. The API base URL can be overridden through the environment
//! variable named by `api.base_url_env` (a `.env` file is honoured).

use reqwest::header::HeaderName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure loaded from relay.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= API Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable that overrides `base_url` when set
    #[serde(default = "default_base_url_env")]
    pub base_url_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_base_url_env() -> String {
    "RELAY_API_BASE_URL".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_url_env: default_base_url_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the raw access token (no `Bearer ` prefix)
    #[serde(default = "default_access_header")]
    pub access_header: String,

    /// Header carrying the refresh token while it is unexpired
    #[serde(default = "default_refresh_header")]
    pub refresh_header: String,

    /// Request paths that skip the credential pre-flight
    #[serde(default = "default_exempt_paths")]
    pub exempt_paths: Vec<String>,
}

fn default_access_header() -> String {
    "Authorization".to_string()
}

fn default_refresh_header() -> String {
    "refreshtoken".to_string()
}

fn default_exempt_paths() -> Vec<String> {
    vec![
        "/user/login".to_string(),
        "/user/sign-up".to_string(),
        "/user/forgot-password".to_string(),
    ]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_header: default_access_header(),
            refresh_header: default_refresh_header(),
            exempt_paths: default_exempt_paths(),
        }
    }
}

// ============= Storage Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".relay/session.json")
}

fn default_preferences_file() -> PathBuf {
    PathBuf::from(".relay/preferences.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
            preferences_file: default_preferences_file(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl RelayConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: RelayConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Validate URLs, header names and exempt paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        for (field, name) in [
            ("auth.access_header", &self.auth.access_header),
            ("auth.refresh_header", &self.auth.refresh_header),
        ] {
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                ConfigError::ValidationError(format!("{} is not a valid header name: '{}'", field, name))
            })?;
        }

        if self.auth.access_header.eq_ignore_ascii_case(&self.auth.refresh_header) {
            return Err(ConfigError::ValidationError(
                "auth.access_header and auth.refresh_header must differ".to_string(),
            ));
        }

        if let Some(bad) = self.auth.exempt_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::ValidationError(format!(
                "auth.exempt_paths entries must start with '/', got '{}'",
                bad
            )));
        }

        Ok(())
    }

    /// Effective API base URL: the env override if set, else `api.base_url`
    pub fn base_url(&self) -> String {
        std::env::var(&self.api.base_url_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config() -> String {
        r#"
[api]
base_url = "https://console.example.com/api/"
base_url_env = "RELAY_TEST_UNSET_BASE_URL"
timeout_secs = 10

[auth]
access_header = "Authorization"
refresh_header = "x-refresh-token"

[storage]
session_file = "/tmp/relay/session.json"

[logging]
level = "debug"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config: RelayConfig =
            toml::from_str(&create_test_config()).expect("Failed to parse config");

        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.auth.refresh_header, "x-refresh-token");
        assert_eq!(config.auth.exempt_paths, default_exempt_paths());
        assert_eq!(
            config.storage.session_file,
            PathBuf::from("/tmp/relay/session.json")
        );
        assert_eq!(
            config.storage.preferences_file,
            PathBuf::from(".relay/preferences.json")
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.base_url(), "https://console.example.com/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config: RelayConfig = toml::from_str("").expect("empty config should parse");

        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.base_url_env, "RELAY_API_BASE_URL");
        assert_eq!(config.auth.access_header, "Authorization");
        assert_eq!(config.auth.refresh_header, "refreshtoken");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_env_override() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("RELAY_TEST_OVERRIDE_BASE_URL", "http://override:9000/");
        }
        let mut config = RelayConfig::default();
        config.api.base_url_env = "RELAY_TEST_OVERRIDE_BASE_URL".to_string();

        assert_eq!(config.base_url(), "http://override:9000");
    }

    #[test]
    fn test_validation_rejects_non_http_base_url() {
        let mut config = RelayConfig::default();
        config.api.base_url_env = "RELAY_TEST_UNSET_BASE_URL".to_string();
        config.api.base_url = "ftp://example.com".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_header_name() {
        let mut config = RelayConfig::default();
        config.api.base_url_env = "RELAY_TEST_UNSET_BASE_URL".to_string();
        config.auth.refresh_header = "refresh token".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_same_headers() {
        let mut config = RelayConfig::default();
        config.api.base_url_env = "RELAY_TEST_UNSET_BASE_URL".to_string();
        config.auth.refresh_header = "authorization".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_relative_exempt_path() {
        let mut config = RelayConfig::default();
        config.api.base_url_env = "RELAY_TEST_UNSET_BASE_URL".to_string();
        config.auth.exempt_paths.push("user/login".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = RelayConfig::load("/definitely/not/here/relay.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));

        let fallback = RelayConfig::load_or_default("/definitely/not/here/relay.toml")
            .expect("missing file should fall back to defaults");
        assert_eq!(fallback.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(&path, create_test_config()).unwrap();

        let config = RelayConfig::load(&path).expect("should load");
        assert_eq!(config.auth.refresh_header, "x-refresh-token");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            RelayConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
