//! Output filename convention for thumbnails.
//!
//! A thumbnail keeps the source's stem and extension and gets the requested
//! box size inserted between them, separated by a space:
//!
//! - `IMG_0042.JPG` at 300x400 → `IMG_0042 300x400.JPG`
//! - `archive.tar.gz` at 10x20 → `archive.tar 10x20.gz`
//! - `README` at 10x20 → `README 10x20` (no extension, no trailing dot)
//!
//! The size in the name is the requested box, not the final pixel size: an
//! image that fits the box at 300x225 is still named `300x400`.

use crate::imaging::ThumbnailSize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// `<stem> <w>x<h>.<ext>` for `source`, without any directory.
///
/// Works on `OsStr` so non-UTF-8 names survive untouched.
pub fn thumbnail_file_name(source: &Path, size: ThumbnailSize) -> OsString {
    let stem = source
        .file_stem()
        .or_else(|| source.file_name())
        .unwrap_or_else(|| OsStr::new(""));

    let mut name = OsString::new();
    name.push(stem);
    name.push(format!(" {size}"));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Full destination path of the thumbnail for `source` inside `dest_dir`.
pub fn thumbnail_path(dest_dir: &Path, source: &Path, size: ThumbnailSize) -> PathBuf {
    dest_dir.join(thumbnail_file_name(source, size))
}
