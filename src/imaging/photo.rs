//! The in-memory image handle passed between load, transform and save.

use image::{DynamicImage, ImageFormat};

/// Decoded pixels plus the metadata that travels with them.
///
/// `exif` holds the raw TIFF-structured EXIF block exactly as the decoder
/// returned it. `None` means the source carried no EXIF profile at all, which
/// is distinct from a profile that lacks an orientation tag.
#[derive(Debug, Clone)]
pub struct Photo {
    pub pixels: DynamicImage,
    pub exif: Option<Vec<u8>>,
    /// Format detected while decoding, if known.
    pub format: Option<ImageFormat>,
}

impl Photo {
    pub fn new(pixels: DynamicImage) -> Self {
        Self {
            pixels,
            exif: None,
            format: None,
        }
    }

    pub fn with_exif(mut self, exif: Vec<u8>) -> Self {
        self.exif = Some(exif);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn has_exif(&self) -> bool {
        self.exif.is_some()
    }

    /// Drop the EXIF profile, returning it if there was one.
    pub fn remove_exif(&mut self) -> Option<Vec<u8>> {
        self.exif.take()
    }

    /// True when there is nothing to transform: zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
