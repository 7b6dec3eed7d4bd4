//! Shared test utilities: synthetic images and hand-built EXIF blocks.
//!
//! The EXIF builders produce the smallest TIFF structure `kamadak-exif`
//! accepts: little-endian header, one IFD0, no next IFD.

use image::{DynamicImage, ImageEncoder, RgbImage};
use std::path::Path;

/// Orientation tag id in IFD0.
const TAG_ORIENTATION: u16 = 0x0112;
/// ResolutionUnit, used as a harmless non-orientation tag.
const TAG_RESOLUTION_UNIT: u16 = 0x0128;
const TYPE_SHORT: u16 = 3;

/// Little-endian TIFF with a single SHORT entry in IFD0.
fn tiff_with_short(tag: u16, value: u16) -> Vec<u8> {
    let mut tiff = Vec::with_capacity(26);
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset
    tiff.extend_from_slice(&1u16.to_le_bytes()); // entry count
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&TYPE_SHORT.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes()); // value count
    tiff.extend_from_slice(&value.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]); // pad value field to 4 bytes
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD
    tiff
}

/// Raw EXIF block carrying only an orientation tag.
pub fn exif_with_orientation(value: u16) -> Vec<u8> {
    tiff_with_short(TAG_ORIENTATION, value)
}

/// Raw EXIF block with a tag, but not the orientation tag.
pub fn exif_without_orientation() -> Vec<u8> {
    tiff_with_short(TAG_RESOLUTION_UNIT, 2)
}

/// Image where every pixel is distinct and (0, 0) is pure red.
pub fn marker_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if x == 0 && y == 0 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([(10 + x * 20) as u8, (10 + y * 20) as u8, 200])
        }
    }))
}

/// Encode `pixels` as JPEG and splice in an APP1 EXIF segment right after SOI.
pub fn jpeg_bytes(pixels: &DynamicImage, exif: Option<&[u8]>) -> Vec<u8> {
    let rgb = pixels.to_rgb8();
    let mut encoded = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, 95)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();

    let Some(exif) = exif else {
        return encoded;
    };
    let payload_len = 2 + 6 + exif.len();
    let mut out = Vec::with_capacity(encoded.len() + payload_len + 2);
    out.extend_from_slice(&encoded[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&(payload_len as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(exif);
    out.extend_from_slice(&encoded[2..]);
    out
}

/// Write a JPEG file, optionally tagged with an orientation value.
pub fn write_jpeg(path: &Path, pixels: &DynamicImage, orientation: Option<u16>) {
    let exif = orientation.map(exif_with_orientation);
    std::fs::write(path, jpeg_bytes(pixels, exif.as_deref())).unwrap();
}
