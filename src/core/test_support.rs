//! Fixtures and collaborator doubles shared by the unit tests.

use crate::core::archive::{ArchiveHandle, Archiver, ZipArchiver};
use crate::core::download::Fetcher;
use crate::core::progress::DownloadProgress;
use crate::error::{InstallerError, Result};
use std::cell::{Cell, RefCell};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    std::fs::write(path, zip_bytes(entries)).unwrap();
}

/// A 1.6 style package: files at the root plus the installer stub page.
pub fn flat_package() -> Vec<u8> {
    zip_bytes(&[
        ("Install_PrestaShop.html", b"<html>install</html>"),
        ("prestashop/", b""),
        ("prestashop/index.php", b"<?php // shop"),
        ("prestashop/config/defines.inc.php", b"<?php define('_PS_MODE_DEV_', false);"),
    ])
}

/// A 1.7 style package: one inner archive plus loose helper files.
pub fn nested_package() -> Vec<u8> {
    let inner = zip_bytes(&[
        ("index.php", b"<?php // shop"),
        ("app/config/parameters.yml.dist", b"parameters:"),
        ("install/index.php", b"<?php // installer"),
    ]);

    zip_bytes(&[
        ("prestashop.zip", &inner),
        ("index.php", b"<?php // unpacker"),
        ("Install_PrestaShop.html", b"<html>install</html>"),
    ])
}

/// Serve a single HTTP response on a loopback port and return its URL.
pub fn serve_once(status: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let status = status.to_string();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buffer) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buffer[..n]),
                }
            }

            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/zip\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        }
    });

    format!("http://127.0.0.1:{port}/download/old/prestashop.zip")
}

#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub updates: Vec<(Option<u64>, u64)>,
    pub finished: bool,
}

impl DownloadProgress for RecordingProgress {
    fn update(&mut self, total: Option<u64>, downloaded: u64) {
        self.updates.push((total, downloaded));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

/// Serves a fixed payload for every URL and records the requests.
pub struct StaticFetcher {
    payload: Vec<u8>,
    pub requests: RefCell<Vec<(String, PathBuf)>>,
}

impl StaticFetcher {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        progress: &mut dyn DownloadProgress,
    ) -> Result<()> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), destination.to_path_buf()));

        let total = self.payload.len() as u64;
        progress.update(Some(total), 0);
        std::fs::write(destination, &self.payload)?;
        progress.update(Some(total), total);
        progress.finish();
        Ok(())
    }
}

pub struct FailingFetcher;

impl Fetcher for FailingFetcher {
    fn fetch(&self, url: &str, _destination: &Path, _: &mut dyn DownloadProgress) -> Result<()> {
        Err(InstallerError::download_error(url, "connection reset by peer"))
    }
}

/// Delegates to the zip archiver but refuses the n-th open (1-based).
pub struct FailOnOpen {
    fail_on: usize,
    opened: Cell<usize>,
}

impl FailOnOpen {
    pub fn nth(fail_on: usize) -> Self {
        Self {
            fail_on,
            opened: Cell::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opened.get()
    }
}

impl Archiver for FailOnOpen {
    fn open(&self, path: &Path) -> Result<Box<dyn ArchiveHandle>> {
        let count = self.opened.get() + 1;
        self.opened.set(count);

        if count == self.fail_on {
            return Err(InstallerError::archive_open_error(path, "not a zip archive"));
        }
        ZipArchiver::new().open(path)
    }
}
