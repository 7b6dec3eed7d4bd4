//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two operations that touch codecs:
//! decoding a file into a [`Photo`] and encoding one back out. Pixel work
//! (orientation, resize) happens on the `Photo` itself, so batch logic can be
//! tested with the mock backend below without any files on disk.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::Quality;
use super::photo::Photo;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

pub trait ImageBackend {
    /// Decode an image together with its raw EXIF block, if any.
    fn load(&self, path: &Path) -> Result<Photo, BackendError>;

    /// Encode `photo` to `path`. The format follows the file extension; the
    /// EXIF block is embedded when present and the format supports it.
    fn save(&self, photo: &Photo, path: &Path, quality: Quality) -> Result<(), BackendError>;
}
