//! EXIF orientation normalization.
//!
//! Cameras store pixels in sensor order and record how they should be
//! displayed in the EXIF Orientation tag (0x0112). Viewers that ignore the tag
//! show sideways or mirrored photos. [`normalize`] bakes the tag into the
//! pixels and then drops the EXIF profile so nothing downstream applies the
//! correction a second time.
//!
//! ## Lookup Table
//!
//! | Tag | [`Transform`] | Steps |
//! |---|---|---|
//! | 1 | `Identity` | none |
//! | 2 | `MirrorHorizontal` | flip horizontal |
//! | 3 | `Rotate180` | rotate 180° |
//! | 4 | `MirrorVertical` | flip vertical |
//! | 5 | `MirrorHorizontalRotate270` | flip horizontal, rotate 270° CW |
//! | 6 | `Rotate90` | rotate 90° CW |
//! | 7 | `MirrorHorizontalRotate90` | flip horizontal, rotate 90° CW |
//! | 8 | `Rotate270` | rotate 270° CW |
//!
//! Any other value is [`OrientationError::InvalidOrientation`].

use super::photo::Photo;
use exif::{In, Tag};
use image::{DynamicImage, imageops};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrientationError {
    #[error("Unexpected EXIF orientation value {0}")]
    InvalidOrientation(u32),
    #[error("Malformed EXIF block: {0}")]
    MalformedExif(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Marker some decoders leave in front of the TIFF structure (JPEG APP1 layout).
const APP1_EXIF_HEADER: &[u8] = b"Exif\0\0";

/// A single geometric operation. Rotations are clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Step {
    pub fn apply(self, pixels: &mut DynamicImage) {
        match self {
            Step::FlipHorizontal => imageops::flip_horizontal_in_place(pixels),
            Step::FlipVertical => imageops::flip_vertical_in_place(pixels),
            Step::Rotate90 => *pixels = pixels.rotate90(),
            Step::Rotate180 => imageops::rotate180_in_place(pixels),
            Step::Rotate270 => *pixels = pixels.rotate270(),
        }
    }
}

/// The correction implied by one orientation tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    MirrorHorizontal,
    Rotate180,
    MirrorVertical,
    MirrorHorizontalRotate270,
    Rotate90,
    MirrorHorizontalRotate90,
    Rotate270,
}

impl Transform {
    pub fn from_exif(value: u32) -> Result<Self, OrientationError> {
        match value {
            1 => Ok(Self::Identity),
            2 => Ok(Self::MirrorHorizontal),
            3 => Ok(Self::Rotate180),
            4 => Ok(Self::MirrorVertical),
            5 => Ok(Self::MirrorHorizontalRotate270),
            6 => Ok(Self::Rotate90),
            7 => Ok(Self::MirrorHorizontalRotate90),
            8 => Ok(Self::Rotate270),
            other => Err(OrientationError::InvalidOrientation(other)),
        }
    }

    /// Steps in application order.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::Identity => &[],
            Self::MirrorHorizontal => &[Step::FlipHorizontal],
            Self::Rotate180 => &[Step::Rotate180],
            Self::MirrorVertical => &[Step::FlipVertical],
            Self::MirrorHorizontalRotate270 => &[Step::FlipHorizontal, Step::Rotate270],
            Self::Rotate90 => &[Step::Rotate90],
            Self::MirrorHorizontalRotate90 => &[Step::FlipHorizontal, Step::Rotate90],
            Self::Rotate270 => &[Step::Rotate270],
        }
    }

    /// Whether the output has width and height exchanged.
    pub fn swaps_dimensions(self) -> bool {
        self.steps()
            .iter()
            .any(|s| matches!(s, Step::Rotate90 | Step::Rotate270))
    }

    pub fn apply(self, pixels: &mut DynamicImage) {
        for step in self.steps() {
            step.apply(pixels);
        }
    }
}

/// Which path [`normalize`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized {
    /// No EXIF profile; nothing touched.
    NoExif,
    /// EXIF profile present but without a usable orientation tag; nothing touched,
    /// the profile is kept.
    NoOrientationTag,
    /// Transform applied and the EXIF profile removed.
    Applied(Transform),
}

/// Read the orientation tag from a raw EXIF block.
///
/// Returns the value unvalidated: range checking is [`Transform::from_exif`]'s job,
/// and the dump pass wants to print out-of-range values verbatim.
pub fn read_orientation(raw: &[u8]) -> Result<Option<u32>, OrientationError> {
    let tiff = raw.strip_prefix(APP1_EXIF_HEADER).unwrap_or(raw);
    let exif = exif::Reader::new()
        .read_raw(tiff.to_vec())
        .map_err(|e| OrientationError::MalformedExif(e.to_string()))?;
    Ok(exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0)))
}

/// Apply the EXIF orientation to the pixels, then strip the EXIF profile.
///
/// Calling this twice is harmless: the second call sees no profile.
pub fn normalize(photo: &mut Photo) -> Result<Normalized, OrientationError> {
    if photo.is_empty() {
        return Err(OrientationError::InvalidArgument("image has no pixel data"));
    }
    let Some(raw) = photo.exif.as_deref() else {
        return Ok(Normalized::NoExif);
    };
    let Some(value) = read_orientation(raw)? else {
        return Ok(Normalized::NoOrientationTag);
    };
    let transform = Transform::from_exif(value)?;

    transform.apply(&mut photo.pixels);
    photo.remove_exif();
    tracing::debug!(
        value,
        ?transform,
        swapped = transform.swaps_dimensions(),
        "normalized orientation"
    );
    Ok(Normalized::Applied(transform))
}
