use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};

fn map_permission(path: &Path, e: std::io::Error) -> InstallerError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => InstallerError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => InstallerError::from(e),
    }
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_permission(path, e))?;
    }
    Ok(())
}

pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| map_permission(path, e))
}

/// Resolve a user supplied directory against the current working directory.
pub fn resolve_directory(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Relative paths of every file below `root`, sorted.
pub fn list_files_recursive(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}
