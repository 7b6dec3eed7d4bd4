//! Parameter types for image operations.
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`ThumbnailSize`]: bounding box for a thumbnail, parsed from `WxH`.
//! - [`ExifPolicy`]: whether a thumbnail keeps its EXIF or gets normalized.

use std::fmt;
use std::str::FromStr;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Box the thumbnail is fitted into. Also the `WxH` part of output names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbnailSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ThumbnailSize {
    fn default() -> Self {
        Self::new(300, 400)
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ThumbnailSize {
    type Err = String;

    /// Parses `300x400` (an `X` works too). Zero is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid width '{w}'"))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid height '{h}'"))?;
        if width == 0 || height == 0 {
            return Err(format!("thumbnail size must be non-zero, got '{s}'"));
        }
        Ok(Self::new(width, height))
    }
}

/// What happens to EXIF metadata when making a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifPolicy {
    /// Resize only; the EXIF block (orientation included) is carried over.
    Preserve,
    /// Bake the orientation into the pixels and strip EXIF before resizing.
    Normalize,
}

impl ExifPolicy {
    pub fn label(self) -> &'static str {
        match self {
            ExifPolicy::Preserve => "With EXIF",
            ExifPolicy::Normalize => "Without EXIF",
        }
    }
}
