//! High-level thumbnail operations.
//!
//! These work on an already-loaded [`Photo`]; loading and saving stay with the
//! backend so the pixel logic is testable in memory.

use super::orientation::{Normalized, OrientationError, normalize};
use super::params::{ExifPolicy, ThumbnailSize};
use super::photo::Photo;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Orientation(#[from] OrientationError),
}

/// What [`make_thumbnail`] did, for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOutcome {
    /// `None` when the EXIF policy was [`ExifPolicy::Preserve`].
    pub orientation: Option<Normalized>,
    pub width: u32,
    pub height: u32,
}

/// Shrink (or grow) `photo` to fit inside `size`, keeping the aspect ratio.
pub fn resize_to_fit(photo: &mut Photo, size: ThumbnailSize) {
    if photo.width() == size.width && photo.height() == size.height {
        return;
    }
    photo.pixels = photo
        .pixels
        .resize(size.width, size.height, FilterType::Lanczos3);
}

/// Turn a loaded photo into a thumbnail in place.
///
/// With [`ExifPolicy::Normalize`] the orientation is applied and EXIF stripped
/// before resizing, so the box is measured against the upright image.
pub fn make_thumbnail(
    photo: &mut Photo,
    size: ThumbnailSize,
    policy: ExifPolicy,
) -> Result<ThumbnailOutcome, OperationError> {
    if size.width == 0 || size.height == 0 {
        return Err(OperationError::InvalidArgument(format!(
            "thumbnail size must be non-zero, got {size}"
        )));
    }
    if photo.is_empty() {
        return Err(OperationError::InvalidArgument(
            "image has no pixel data".to_string(),
        ));
    }

    let orientation = match policy {
        ExifPolicy::Preserve => None,
        ExifPolicy::Normalize => Some(normalize(photo)?),
    };
    resize_to_fit(photo, size);

    Ok(ThumbnailOutcome {
        orientation,
        width: photo.width(),
        height: photo.height(),
    })
}
