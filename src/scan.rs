//! Source directory listing.
//!
//! Only the files directly inside a directory are considered, never
//! subdirectories, so a destination folder nested under the source is not
//! picked up again on the next run.
//!
//! ## Filtering
//!
//! - Hidden entries (leading `.`) are skipped
//! - Only regular files whose extension has a compiled-in decoder are kept,
//!   compared case-insensitively (`IMG_0001.JPG` counts)
//! - The result is sorted by file name for stable output

use crate::imaging::supported_input_extensions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// List the image files directly inside `dir`.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }
        if is_image(entry.path()) {
            images.push(entry.into_path());
        } else {
            tracing::debug!(path = %entry.path().display(), "skipping non-image file");
        }
    }
    Ok(images)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    supported_input_extensions().contains(&ext.as_str())
}
