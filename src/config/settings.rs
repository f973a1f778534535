//! Application settings loaded from `config.toml` and the environment.
//!
//! Every field has a default, so the file is optional. After the file is read,
//! `DATABASE_URL`, `API_HOST` and `API_PORT` override the corresponding values.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Cross-origin policy for the browser frontend
    pub cors: CorsConfig,
    /// Request handling limits
    pub api: ApiConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Cross-origin policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost".to_string(),
                "http://localhost:80".to_string(),
                "http://127.0.0.1".to_string(),
            ],
        }
    }
}

/// Request handling limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Upper bound applied to the `limit` query parameter of list endpoints
    pub max_page_limit: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_page_limit: 1000,
        }
    }
}

/// Parses configuration from a TOML string.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML syntax is invalid or a field has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    debug!("Loading configuration from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

impl AppConfig {
    /// Applies `DATABASE_URL`, `API_HOST` and `API_PORT` on top of the loaded values.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `API_PORT` is set but is not a valid port number.
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            self.server.port = port.parse().map_err(|e| Error::Config {
                message: format!("API_PORT must be a port number, got {port:?}: {e}"),
            })?;
        }
        Ok(())
    }

    /// `host:port` string suitable for binding a listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Loads `./config.toml` (if present) and applies environment overrides.
///
/// # Errors
/// Returns an error if the file is malformed or an override is invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    load_config("config.toml")?.apply_env_overrides()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_empty() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cors.allowed_origins.len(), 3);
        assert_eq!(config.api.max_page_limit, 1000);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            [server]
            port = 9100

            [database]
            url = "sqlite::memory:"

            [cors]
            allowed_origins = ["http://example.test"]
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.cors.allowed_origins, vec!["http://example.test"]);
        assert_eq!(config.bind_address(), "0.0.0.0:9100");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = parse_config("[server]\nport = \"not a number\"");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8081"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.bind_address(), "127.0.0.1:8081");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == "API_PORT").then(|| "eighty".to_string()));
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
