//! Download-then-extract workflow for one distribution into one directory.
//!
//! The installer owns the downloaded archive for the length of a single
//! [`Installer::install`] call. The archive is removed only once every
//! extraction step succeeded; after an open failure the files stay on disk.

use crate::core::archive::Archiver;
use crate::core::download::Fetcher;
use crate::core::progress::DownloadProgress;
use crate::core::version::{PackageLayout, ResolvedVersion, VersionSelector};
use crate::error::Result;
use crate::utils::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Installer page shipped at the root of flat packages.
pub const INSTALLER_STUB: &str = "Install_PrestaShop.html";

/// Archive wrapped inside nested packages.
pub const NESTED_ARCHIVE: &str = "prestashop.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub target_directory: PathBuf,
    pub selector: VersionSelector,
}

impl InstallRequest {
    /// Resolves `directory` against the current working directory.
    pub fn new(directory: &Path, selector: VersionSelector) -> Result<Self> {
        Ok(Self {
            target_directory: fs::resolve_directory(directory)?,
            selector,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Use an archive left in the target directory instead of downloading again.
    pub reuse_download: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub version: String,
    pub path: PathBuf,
}

pub struct Installer<F, A> {
    fetcher: F,
    archiver: A,
    base_url: String,
    options: InstallOptions,
}

impl<F: Fetcher, A: Archiver> Installer<F, A> {
    pub fn new(fetcher: F, archiver: A, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            archiver,
            base_url: base_url.into(),
            options: InstallOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InstallOptions) -> Self {
        self.options = options;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn archiver(&self) -> &A {
        &self.archiver
    }

    pub fn resolve(&self, selector: VersionSelector) -> ResolvedVersion {
        selector.resolve(&self.base_url)
    }

    pub fn install(
        &self,
        request: &InstallRequest,
        progress: &mut dyn DownloadProgress,
    ) -> Result<Installation> {
        let resolved = self.resolve(request.selector);
        let target = request.target_directory.as_path();
        info!(
            version = %resolved.version,
            layout = %resolved.layout,
            target = %target.display(),
            "installing"
        );

        fs::ensure_dir_exists(target)?;

        let archive_path = target.join(&resolved.archive_name);
        if self.options.reuse_download && archive_path.is_file() {
            info!(path = %archive_path.display(), "reusing downloaded archive");
        } else {
            self.fetcher.fetch(&resolved.url, &archive_path, progress)?;
        }

        match resolved.layout {
            PackageLayout::Flat => self.extract_flat(&archive_path, target)?,
            PackageLayout::Nested => self.extract_nested(&archive_path, target)?,
        }

        fs::remove_file(&archive_path)?;
        info!(version = %resolved.version, "installation complete");

        Ok(Installation {
            version: resolved.version,
            path: target.to_path_buf(),
        })
    }

    fn extract_flat(&self, archive_path: &Path, target: &Path) -> Result<()> {
        let mut archive = self.archiver.open(archive_path)?;

        for name in archive.entry_names() {
            if name == INSTALLER_STUB {
                debug!(entry = %name, "skipping installer stub");
                continue;
            }
            archive.extract_named(target, &name)?;
        }
        Ok(())
    }

    fn extract_nested(&self, archive_path: &Path, target: &Path) -> Result<()> {
        {
            let mut outer = self.archiver.open(archive_path)?;
            outer.extract_named(target, NESTED_ARCHIVE)?;
        }

        let inner_path = target.join(NESTED_ARCHIVE);
        debug!(path = %inner_path.display(), "extracting nested archive");
        {
            let mut inner = self.archiver.open(&inner_path)?;
            inner.extract_all(target)?;
        }

        fs::remove_file(&inner_path)
    }
}
