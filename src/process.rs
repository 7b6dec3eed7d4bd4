//! Batch thumbnail generation.
//!
//! One pass takes every image directly inside a source directory, turns it
//! into a thumbnail according to an [`ExifPolicy`] and writes it into a
//! destination directory under the [`naming`](crate::naming) convention.
//!
//! ## Failure Handling
//!
//! Every file is processed in its own scope. A file that fails to decode,
//! carries an invalid orientation tag, or cannot be written is logged,
//! recorded in the [`BatchReport`] and skipped; the rest of the batch still
//! runs. Only directory-level problems (missing source, destination that
//! cannot be created) abort the pass.
//!
//! ## Progress
//!
//! Callers can pass a channel sender to receive [`ProcessEvent`]s as files
//! complete. The CLI drains it on a printer thread; the processing itself is
//! sequential.

use crate::imaging::{
    BackendError, ExifPolicy, ImageBackend, Normalized, OperationError, Quality, RustBackend,
    ThumbnailOutcome, ThumbnailSize, make_thumbnail,
};
use crate::naming::thumbnail_path;
use crate::scan::{ScanError, list_images};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Settings shared by every file of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub size: ThumbnailSize,
    pub policy: ExifPolicy,
    pub quality: Quality,
}

/// Progress events emitted while a pass runs.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    BatchStarted {
        policy: ExifPolicy,
        source_dir: PathBuf,
        dest_dir: PathBuf,
        image_count: usize,
    },
    ThumbnailWritten {
        /// 1-based position within the batch.
        index: usize,
        source: PathBuf,
        output: PathBuf,
        width: u32,
        height: u32,
        orientation: Option<Normalized>,
    },
    ThumbnailFailed {
        index: usize,
        source: PathBuf,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: String,
}

/// What one pass produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run one pass with the [`RustBackend`].
pub fn make_thumbnails(
    source_dir: &Path,
    dest_dir: &Path,
    options: &BatchOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    let backend = RustBackend::new();
    make_thumbnails_with_backend(&backend, source_dir, dest_dir, options, progress)
}

/// Run one pass using a specific backend (allows testing with mock).
pub fn make_thumbnails_with_backend(
    backend: &impl ImageBackend,
    source_dir: &Path,
    dest_dir: &Path,
    options: &BatchOptions,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    let emit = |event: ProcessEvent| {
        if let Some(tx) = &progress {
            // A closed receiver only means nobody is watching.
            tx.send(event).ok();
        }
    };

    let sources = list_images(source_dir)?;
    std::fs::create_dir_all(dest_dir)?;

    tracing::info!(
        policy = options.policy.label(),
        source = %source_dir.display(),
        dest = %dest_dir.display(),
        count = sources.len(),
        "starting thumbnail pass"
    );
    emit(ProcessEvent::BatchStarted {
        policy: options.policy,
        source_dir: source_dir.to_path_buf(),
        dest_dir: dest_dir.to_path_buf(),
        image_count: sources.len(),
    });

    let mut report = BatchReport::default();
    for (i, source) in sources.iter().enumerate() {
        let index = i + 1;
        match make_thumbnail_file(backend, source, dest_dir, options) {
            Ok((output, outcome)) => {
                tracing::debug!(
                    source = %source.display(),
                    output = %output.display(),
                    width = outcome.width,
                    height = outcome.height,
                    "thumbnail written"
                );
                emit(ProcessEvent::ThumbnailWritten {
                    index,
                    source: source.clone(),
                    output: output.clone(),
                    width: outcome.width,
                    height: outcome.height,
                    orientation: outcome.orientation,
                });
                report.written.push(output);
            }
            Err(err) => {
                tracing::warn!(source = %source.display(), error = %err, "thumbnail failed");
                emit(ProcessEvent::ThumbnailFailed {
                    index,
                    source: source.clone(),
                    error: err.to_string(),
                });
                report.failures.push(FileFailure {
                    source: source.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Load, transform and save a single file. The decoded photo is dropped
/// when this returns, on success and failure alike.
fn make_thumbnail_file(
    backend: &impl ImageBackend,
    source: &Path,
    dest_dir: &Path,
    options: &BatchOptions,
) -> Result<(PathBuf, ThumbnailOutcome), ProcessError> {
    let mut photo = backend.load(source)?;
    let outcome = make_thumbnail(&mut photo, options.size, options.policy)?;
    let output = thumbnail_path(dest_dir, source, options.size);
    backend.save(&photo, &output, options.quality)?;
    Ok((output, outcome))
}
