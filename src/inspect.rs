//! EXIF orientation dump.
//!
//! Reports, for every image in a directory, whether it carries EXIF and what
//! its raw orientation value is. Values are shown as stored, out-of-range ones
//! included, which makes this the tool for checking what a thumbnail pass
//! actually wrote. A file that fails to load is reported and the pass moves on.

use crate::imaging::{BackendError, ImageBackend, OrientationError, read_orientation};
use crate::scan::{ScanError, list_images};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Orientation(#[from] OrientationError),
}

/// EXIF state of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifSummary {
    NoExif,
    /// EXIF present; `None` when it has no orientation tag.
    Orientation(Option<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Error description when the file could not be inspected.
    pub result: Result<ExifSummary, String>,
}

/// Everything found in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub files: Vec<FileReport>,
}

pub fn inspect_file(
    backend: &impl ImageBackend,
    path: &Path,
) -> Result<ExifSummary, InspectError> {
    let photo = backend.load(path)?;
    match photo.exif.as_deref() {
        None => Ok(ExifSummary::NoExif),
        Some(raw) => Ok(ExifSummary::Orientation(read_orientation(raw)?)),
    }
}

/// Inspect every image in `dir`. Only a missing or unreadable directory is an error.
pub fn inspect_directory(
    backend: &impl ImageBackend,
    dir: &Path,
) -> Result<DirectoryReport, ScanError> {
    let files = list_images(dir)?
        .into_iter()
        .map(|path| {
            let result = inspect_file(backend, &path).map_err(|err| {
                tracing::warn!(path = %path.display(), error = %err, "inspect failed");
                err.to_string()
            });
            FileReport { path, result }
        })
        .collect();

    Ok(DirectoryReport {
        directory: dir.to_path_buf(),
        files,
    })
}
