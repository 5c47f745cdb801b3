use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Multiplier applied to every simulated repository latency.
    /// `0.0` turns the simulation off.
    pub latency_scale: f64,
}

impl ServerConfig {
    /// Loads a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.latency_scale.is_finite() || self.latency_scale < 0.0 {
            return Err(Error::Config(format!(
                "latency_scale must be a non-negative number, got {}",
                self.latency_scale
            )));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("vitrine.db")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            latency_scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vitrine.toml");
        std::fs::write(&path, "port = 9090\nlatency_scale = 0.0\n").unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.latency_scale, 0.0);
        assert_eq!(config.db_path(), PathBuf::from("./data/vitrine.db"));
    }

    #[test]
    fn test_negative_latency_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vitrine.toml");
        std::fs::write(&path, "latency_scale = -1.0\n").unwrap();

        let result = ServerConfig::from_file(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }
}
