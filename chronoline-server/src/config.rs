//! Configuration for chronoline-server

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chronoline")
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the SQLite database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// HTTP API port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Allowed CORS origin. Unset permits any origin, which is what the
    /// public deployment wants; set it to lock the API to one frontend.
    #[serde(default)]
    pub cors_allowed_origin: Option<String>,
}

fn default_http_port() -> u16 {
    3001
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http_port: default_http_port(),
            cors_allowed_origin: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Save config to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Path of the persons database
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("chronoline.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.http_port, 3001);
        assert_eq!(config.cors_allowed_origin, None);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            http_port = 8080
            cors_allowed_origin = "http://localhost:3000"
            data_dir = "/var/lib/chronoline"
            "#,
        )
        .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(
            config.cors_allowed_origin.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/chronoline/chronoline.db"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/chronoline-test"),
            http_port: 4000,
            cors_allowed_origin: Some("https://chronoline.example".to_string()),
        };
        let parsed: Config = toml::from_str(&toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(parsed.http_port, config.http_port);
        assert_eq!(parsed.cors_allowed_origin, config.cors_allowed_origin);
    }
}
