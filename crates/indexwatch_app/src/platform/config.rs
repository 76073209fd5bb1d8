use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indexwatch_client::{ClientSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogSettings;

pub(crate) const CONFIG_FILENAME: &str = "indexwatch.ron";
pub(crate) const API_URL_ENV: &str = "INDEXWATCH_API_URL";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub api_base_url: String,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub logging: LogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            download_dir: PathBuf::from("."),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            logging: LogSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// A non-blank override replaces the configured base URL.
    pub fn with_api_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() {
                self.api_base_url = url;
            }
        }
        self
    }
}

/// A missing file is not an error; the defaults apply.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::logging::LogDestination;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(api_base_url: "https://indexer.internal/api", request_timeout_secs: Some(120))"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api_base_url, "https://indexer.internal/api");
        assert_eq!(config.request_timeout_secs, Some(120));
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.logging, LogSettings::default());

        let settings = config.client_settings();
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn logging_section_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(logging: (destination: Both, level: "debug", file: "logs/dash.log"))"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.logging.destination, LogDestination::Both);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);
        assert_eq!(config.logging.file, PathBuf::from("logs/dash.log"));
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(api_base_url: 42").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let config = AppConfig::default()
            .with_api_override(Some(" http://127.0.0.1:9000/api ".to_string()));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");

        let config = config.with_api_override(Some("   ".to_string()));
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");

        let config = config.with_api_override(None);
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
    }
}
