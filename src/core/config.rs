use crate::error::{InstallerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://www.prestashop.com/download/old";
pub const DOWNLOAD_URL_ENV: &str = "PRESTASHOP_DOWNLOAD_URL";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub download_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            user_agent: format!("prestashop-console/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 600,
            progress: true,
        }
    }
}

impl Config {
    /// Load the user configuration, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let mut config = match get_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(DOWNLOAD_URL_ENV) {
            if !url.trim().is_empty() {
                config.download_base_url = url;
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            InstallerError::ConfigError { message } => {
                InstallerError::config_error(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| InstallerError::config_error(e.to_string()))?;

        if config.download_base_url.trim().is_empty() {
            return Err(InstallerError::config_error("download_base_url must not be empty"));
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prestashop-console").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_overrides() {
        let content = r#"
download_base_url = "http://mirror.local/prestashop"
timeout_secs = 30
progress = false
"#;

        let config = Config::parse(content).unwrap();
        assert_eq!(config.download_base_url, "http://mirror.local/prestashop");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.progress);
        assert_eq!(config.user_agent, Config::default().user_agent);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Config::parse("timeout_secs = \"soon\""),
            Err(InstallerError::ConfigError { .. })
        ));
        assert!(matches!(
            Config::parse("download_base_url = \"  \""),
            Err(InstallerError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_reports_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "progress = maybe").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
