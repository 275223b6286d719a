use crate::core::config::Config;
use crate::core::progress::DownloadProgress;
use crate::error::{InstallerError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

const CHUNK_SIZE: usize = 64 * 1024;

/// Streams a remote resource into a local file.
pub trait Fetcher {
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        progress: &mut dyn DownloadProgress,
    ) -> Result<()>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| InstallerError::config_error(format!("HTTP client: {e}")))?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        progress: &mut dyn DownloadProgress,
    ) -> Result<()> {
        debug!(url, destination = %destination.display(), "starting download");

        let mut response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| InstallerError::download_error(url, e))?;

        let total = response.content_length();
        debug!(?total, status = %response.status(), "response received");

        let write_error = |e: std::io::Error| {
            InstallerError::download_error(url, format!("{}: {e}", destination.display()))
        };

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(&write_error)?;
        }
        let mut file = File::create(destination).map_err(&write_error)?;

        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut downloaded = 0u64;
        progress.update(total, downloaded);

        loop {
            let read = response
                .read(&mut buffer)
                .map_err(|e| InstallerError::download_error(url, e))?;
            if read == 0 {
                break;
            }

            file.write_all(&buffer[..read]).map_err(&write_error)?;
            downloaded += read as u64;
            progress.update(total, downloaded);
        }

        file.flush().map_err(&write_error)?;
        progress.finish();

        if let Some(expected) = total {
            if downloaded < expected {
                return Err(InstallerError::download_error(
                    url,
                    format!("connection closed after {downloaded} of {expected} bytes"),
                ));
            }
        }

        debug!(bytes = downloaded, "download finished");
        Ok(())
    }
}
