use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InstallerError>;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid version '{version}': expected one of 1.6, 1.7")]
    InvalidVersion { version: String },

    #[error("Download failed: {url}: {message}")]
    DownloadError { url: String, message: String },

    #[error("Unable to unzip {path}: {message}")]
    ArchiveOpenError { path: PathBuf, message: String },

    #[error("Entry '{entry}' not found in {archive}")]
    MissingEntry { archive: PathBuf, entry: String },

    #[error("Extraction failed: {path}: {message}")]
    ExtractionError { path: PathBuf, message: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Prompt error: {message}")]
    PromptError { message: String },
}

impl InstallerError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        InstallerError::ConfigError {
            message: message.into(),
        }
    }

    pub fn download_error<U: Into<String>, M: ToString>(url: U, message: M) -> Self {
        InstallerError::DownloadError {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn archive_open_error<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        InstallerError::ArchiveOpenError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn extraction_error<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        InstallerError::ExtractionError {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<dialoguer::Error> for InstallerError {
    fn from(error: dialoguer::Error) -> Self {
        InstallerError::PromptError {
            message: error.to_string(),
        }
    }
}
