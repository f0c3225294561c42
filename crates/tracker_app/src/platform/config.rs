use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracker_engine::ClientSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Settings read from a RON file. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub recheck_delay_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            recheck_delay_secs: tracker_core::RECHECK_DELAY.as_secs(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_body_bytes: client.max_body_bytes,
            state_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn recheck_delay(&self) -> Duration {
        Duration::from_secs(self.recheck_delay_secs.max(1))
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config =
            AppConfig::from_ron(r#"(server_url: "http://10.0.0.5:8000", recheck_delay_secs: 15)"#)
                .unwrap();

        assert_eq!(config.server_url, "http://10.0.0.5:8000");
        assert_eq!(config.recheck_delay(), Duration::from_secs(15));
        assert_eq!(config.client_settings().max_body_bytes, 64 * 1024);
        assert_eq!(config.state_dir, PathBuf::from("."));
    }

    #[test]
    fn zero_delay_is_clamped() {
        let config = AppConfig {
            recheck_delay_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.recheck_delay(), Duration::from_secs(1));
    }

    #[test]
    fn unreadable_and_invalid_files_are_reported() {
        let missing = AppConfig::load(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        fs::write(&path, "(server_url: 42)").unwrap();
        let invalid = AppConfig::load(&path).unwrap_err();
        assert!(matches!(invalid, ConfigError::Parse { .. }));
    }
}
