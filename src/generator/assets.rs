//! Stylesheet and asset copying

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::Generator;
use crate::error::BuildError;

impl Generator {
    /// styles.css from the templates directory
    pub(super) fn copy_style(&self) -> Result<(), BuildError> {
        copy_file(
            &self.site.templates_dir.join("styles.css"),
            &self.site.public_dir.join("styles.css"),
        )?;
        tracing::info!("Copied styles.css");
        Ok(())
    }

    /// Mirror the content assets tree into public/assets
    pub(super) fn copy_assets(&self) -> Result<(), BuildError> {
        let count = copy_dir(&self.site.assets_dir, &self.site.public_dir.join("assets"))?;
        tracing::info!("Copied {} assets", count);
        Ok(())
    }
}

/// Copy a single file, creating the destination's parent directory
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), BuildError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::create_dir(parent, e))?;
    }
    fs::copy(src, dst).map_err(|e| BuildError::read(src, e))?;
    Ok(())
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// Depth-first; directories are created even when empty, existing files are
/// overwritten and symlinks are not followed. The first I/O error aborts.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    let mut count = 0;

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            BuildError::read(path, e.into())
        })?;

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| BuildError::create_dir(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| BuildError::write(&target, e))?;
            tracing::debug!("Copied {:?}", relative);
            count += 1;
        }
    }

    Ok(count)
}
