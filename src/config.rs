use crate::app::DuplicatePolicy;
use crate::constants::{DEFAULT_DIRECTIONS_URL, DEFAULT_GEOCODE_URL, DUPLICATE_RADIUS_M};
use crate::error::{CenterError, Result};
use crate::infra::NcpCredentials;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub maps: MapsConfig,
    pub dedupe: DedupeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/center_search.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    pub client_id: String,
    pub client_secret: String,
    pub geocode_url: String,
    pub directions_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl MapsConfig {
    pub fn credentials(&self) -> NcpCredentials {
        NcpCredentials::new(&self.client_id, &self.client_secret)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DedupeConfig {
    pub radius_meters: f64,
    pub fail_open_on_geocode_error: bool,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            radius_meters: DUPLICATE_RADIUS_M,
            fail_open_on_geocode_error: true,
        }
    }
}

impl DedupeConfig {
    pub fn policy(&self) -> DuplicatePolicy {
        DuplicatePolicy {
            radius_m: self.radius_meters,
            fail_open_on_geocode_error: self.fail_open_on_geocode_error,
        }
    }
}

impl Config {
    /// Reads `CENTER_CONFIG` (or `config.toml`), then applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("CENTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            CenterError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(id) = lookup("NCP_CLIENT_ID") {
            self.maps.client_id = id;
        }
        if let Some(secret) = lookup("NCP_CLIENT_SECRET") {
            self.maps.client_secret = secret;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| CenterError::Config(format!("PORT is not a valid port: {port}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::from_file("/nonexistent/center_search.toml").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.maps.geocode_url, DEFAULT_GEOCODE_URL);
        assert_eq!(config.dedupe.radius_meters, 10.0);
        assert!(config.dedupe.fail_open_on_geocode_error);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[maps]\nclient_id = \"abc\"\ntimeout_seconds = 3\n\n[dedupe]\nfail_open_on_geocode_error = false"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.maps.client_id, "abc");
        assert_eq!(config.maps.timeout_seconds, Some(3));
        assert_eq!(config.maps.directions_url, DEFAULT_DIRECTIONS_URL);
        assert!(!config.dedupe.policy().fail_open_on_geocode_error);
        assert_eq!(config.database.path, "data/center_search.db");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(CenterError::Toml(_))));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("NCP_CLIENT_ID", "env-id"),
            ("NCP_CLIENT_SECRET", "env-secret"),
            ("PORT", "9090"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.maps.credentials().is_configured());

        let mut bad = Config::default();
        assert!(bad.apply_env(|k| (k == "PORT").then(|| "http".to_string())).is_err());
    }
}
