use crate::error::{InstallerError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Opens archives found on disk.
pub trait Archiver {
    fn open(&self, path: &Path) -> Result<Box<dyn ArchiveHandle>>;
}

/// An opened archive. Dropping the handle closes it.
pub trait ArchiveHandle {
    /// Entry names in archive order.
    fn entry_names(&self) -> Vec<String>;

    fn extract_all(&mut self, destination: &Path) -> Result<()>;

    fn extract_named(&mut self, destination: &Path, name: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for ZipArchiver {
    fn open(&self, path: &Path) -> Result<Box<dyn ArchiveHandle>> {
        let file = File::open(path).map_err(|e| InstallerError::archive_open_error(path, e))?;
        let archive =
            ZipArchive::new(file).map_err(|e| InstallerError::archive_open_error(path, e))?;

        debug!(path = %path.display(), entries = archive.len(), "opened archive");
        Ok(Box::new(ZipHandle {
            path: path.to_path_buf(),
            archive,
        }))
    }
}

pub struct ZipHandle {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ZipHandle {
    fn extract_index(&mut self, index: usize, destination: &Path) -> Result<()> {
        let mut file = self
            .archive
            .by_index(index)
            .map_err(|e| InstallerError::extraction_error(&self.path, e))?;

        let outpath = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                warn!(entry = file.name(), "skipping entry outside of destination");
                return Ok(());
            }
        };

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)
                .map_err(|e| InstallerError::extraction_error(&outpath, e))?;
        } else {
            if let Some(p) = outpath.parent() {
                if !p.exists() {
                    std::fs::create_dir_all(p)
                        .map_err(|e| InstallerError::extraction_error(p, e))?;
                }
            }
            let mut outfile = File::create(&outpath)
                .map_err(|e| InstallerError::extraction_error(&outpath, e))?;
            std::io::copy(&mut file, &mut outfile)
                .map_err(|e| InstallerError::extraction_error(&outpath, e))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| InstallerError::extraction_error(&outpath, e))?;
            }
        }

        Ok(())
    }
}

impl ArchiveHandle for ZipHandle {
    fn entry_names(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(str::to_string))
            .collect()
    }

    fn extract_all(&mut self, destination: &Path) -> Result<()> {
        debug!(
            archive = %self.path.display(),
            destination = %destination.display(),
            "extracting all entries"
        );
        std::fs::create_dir_all(destination)
            .map_err(|e| InstallerError::extraction_error(destination, e))?;

        for i in 0..self.archive.len() {
            self.extract_index(i, destination)?;
        }
        Ok(())
    }

    fn extract_named(&mut self, destination: &Path, name: &str) -> Result<()> {
        let index = self
            .archive
            .index_for_name(name)
            .ok_or_else(|| InstallerError::MissingEntry {
                archive: self.path.clone(),
                entry: name.to_string(),
            })?;

        std::fs::create_dir_all(destination)
            .map_err(|e| InstallerError::extraction_error(destination, e))?;
        self.extract_index(index, destination)
    }
}
