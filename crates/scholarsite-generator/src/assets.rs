//! Static asset copying.
//!
//! Files under the static directory (portrait, CV PDF, logos) are copied
//! verbatim into the output tree. Hidden files and directories are skipped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies a static directory into the output tree.
#[derive(Debug, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy every visible file from `source_dir` into `dest_dir`.
    ///
    /// Returns the copied paths relative to `source_dir`. A missing source
    /// directory copies nothing.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut copied = Vec::new();

        if !source_dir.is_dir() {
            debug!(source = %source_dir.display(), "no static directory, skipping");
            return Ok(copied);
        }

        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "copying static assets"
        );

        self.process_dir(source_dir, source_dir, dest_dir, &mut copied)?;
        copied.sort();

        info!(count = copied.len(), "assets copied");
        Ok(copied)
    }

    fn process_dir(
        &self,
        base_dir: &Path,
        current_dir: &Path,
        dest_base: &Path,
        copied: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for entry in fs::read_dir(current_dir)? {
            let path = entry?.path();

            if is_hidden(&path) {
                continue;
            }

            if path.is_dir() {
                self.process_dir(base_dir, &path, dest_base, copied)?;
            } else if path.is_file() {
                copied.push(self.process_file(base_dir, &path, dest_base)?);
            }
        }

        Ok(())
    }

    fn process_file(&self, base_dir: &Path, file_path: &Path, dest_base: &Path) -> Result<PathBuf> {
        let relative = file_path
            .strip_prefix(base_dir)
            .map_err(|_| AssetError::InvalidPath(file_path.to_path_buf()))?;
        let dest_path = dest_base.join(relative);

        if dest_path.exists() {
            warn!(path = %relative.display(), "static file replaces a generated file");
        }
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(file_path, &dest_path)?;

        debug!(
            src = %file_path.display(),
            dest = %dest_path.display(),
            "copied asset"
        );

        Ok(relative.to_path_buf())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}
