//! Pure Rust image backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader`, format guessed from content |
//! | EXIF extraction | `image::ImageDecoder::exif_metadata` (raw TIFF block) |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder` with quality |
//! | Encode PNG / WebP / TIFF | `PngEncoder`, `WebPEncoder` (lossless), `TiffEncoder` |
//! | EXIF passthrough | `ImageEncoder::set_exif_metadata` for JPEG, PNG, WebP |
//!
//! The TIFF encoder does not accept an EXIF block, so TIFF output never carries
//! one, even in the "with EXIF" pass. The save still succeeds.

use super::backend::{BackendError, ImageBackend};
use super::params::Quality;
use super::photo::Photo;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageEncoder, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_failed(path: &Path, err: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), err))
}

/// Decode pixels and pull the EXIF block off the same decoder.
fn load_photo(path: &Path) -> Result<Photo, BackendError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let mut decoder = reader.into_decoder().map_err(|e| decode_failed(path, e))?;
    let exif = decoder
        .exif_metadata()
        .map_err(|e| decode_failed(path, e))?
        .filter(|block| !block.is_empty());
    let pixels = DynamicImage::from_decoder(decoder).map_err(|e| decode_failed(path, e))?;
    Ok(Photo {
        pixels,
        exif,
        format,
    })
}

/// JPEG only takes 8-bit gray or RGB.
fn jpeg_pixels(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(pixels),
        _ => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
    }
}

/// The WebP encoder only takes 8-bit channels.
fn webp_pixels(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => {
            Cow::Borrowed(pixels)
        }
        color if color.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(pixels.to_rgba8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
    }
}

fn attach_exif(encoder: &mut impl ImageEncoder, photo: &Photo) {
    if let Some(exif) = photo.exif.clone() {
        let _ = encoder.set_exif_metadata(exif); // ignore UnsupportedError
    }
}

/// Encode to `path`, picking the codec from the extension.
fn save_photo(photo: &Photo, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        BackendError::ProcessingFailed(format!("Unsupported output format: {}", path.display()))
    })?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff
    ) {
        return Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {:?}",
            format
        )));
    }

    // `File::create` truncates an existing thumbnail.
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let result = match format {
        ImageFormat::Jpeg => {
            let quality = quality.value().clamp(1, 100) as u8;
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
            attach_exif(&mut encoder, photo);
            jpeg_pixels(&photo.pixels).write_with_encoder(encoder)
        }
        ImageFormat::Png => {
            let mut encoder = PngEncoder::new(&mut writer);
            attach_exif(&mut encoder, photo);
            photo.pixels.write_with_encoder(encoder)
        }
        ImageFormat::WebP => {
            let mut encoder = WebPEncoder::new_lossless(&mut writer);
            attach_exif(&mut encoder, photo);
            webp_pixels(&photo.pixels).write_with_encoder(encoder)
        }
        _ => {
            let mut encoder = TiffEncoder::new(&mut writer);
            attach_exif(&mut encoder, photo);
            photo.pixels.write_with_encoder(encoder)
        }
    };
    result.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })?;

    // Dropping the writer would flush too, but silently.
    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<Photo, BackendError> {
        load_photo(path)
    }

    fn save(&self, photo: &Photo, path: &Path, quality: Quality) -> Result<(), BackendError> {
        save_photo(photo, path, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::orientation::read_orientation;
    use crate::test_helpers::{exif_with_orientation, marker_image, write_jpeg};

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_input_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn load_jpeg_with_orientation_keeps_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tagged.jpg");
        write_jpeg(&path, &marker_image(40, 30), Some(6));

        let photo = RustBackend::new().load(&path).unwrap();
        assert_eq!((photo.width(), photo.height()), (40, 30));
        assert_eq!(photo.format, Some(ImageFormat::Jpeg));
        let exif = photo.exif.expect("EXIF block should be extracted");
        assert_eq!(read_orientation(&exif).unwrap(), Some(6));
    }

    #[test]
    fn load_jpeg_without_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("plain.jpg");
        write_jpeg(&path, &marker_image(20, 10), None);

        let photo = RustBackend::new().load(&path).unwrap();
        assert!(photo.exif.is_none());
    }

    #[test]
    fn load_guesses_format_from_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("misnamed.png");
        write_jpeg(&path, &marker_image(8, 8), None);

        let photo = RustBackend::new().load(&path).unwrap();
        assert_eq!(photo.format, Some(ImageFormat::Jpeg));
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let result = RustBackend::new().load(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        assert!(RustBackend::new().load(&path).is_err());
    }

    #[test]
    fn save_without_exif_roundtrips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();
        for name in ["out.jpg", "out.png", "out.webp", "out.tiff"] {
            let path = tmp.path().join(name);
            backend
                .save(&Photo::new(marker_image(12, 7)), &path, Quality::default())
                .unwrap();

            let reloaded = backend.load(&path).unwrap();
            assert_eq!((reloaded.width(), reloaded.height()), (12, 7), "{name}");
        }
    }

    #[test]
    fn save_jpeg_without_exif_writes_no_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("clean.jpg");
        let backend = RustBackend::new();
        backend
            .save(&Photo::new(marker_image(6, 6)), &path, Quality::default())
            .unwrap();

        assert!(backend.load(&path).unwrap().exif.is_none());
    }

    #[test]
    fn save_converts_alpha_for_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("alpha.jpg");
        let rgba = DynamicImage::ImageRgba8(marker_image(5, 5).to_rgba8());

        RustBackend::new()
            .save(&Photo::new(rgba), &path, Quality::new(80))
            .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn save_unsupported_format_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();
        let photo = Photo::new(marker_image(4, 4));

        let bmp = tmp.path().join("out.bmp");
        let bare = tmp.path().join("no_extension");
        assert!(backend.save(&photo, &bmp, Quality::default()).is_err());
        assert!(backend.save(&photo, &bare, Quality::default()).is_err());
    }

    #[test]
    fn save_keeps_orientation_tag_where_format_supports_exif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();
        let photo = Photo::new(marker_image(12, 7)).with_exif(exif_with_orientation(6));

        for name in ["tagged.jpg", "tagged.png", "tagged.webp"] {
            let path = tmp.path().join(name);
            backend.save(&photo, &path, Quality::default()).unwrap();

            let exif = backend.load(&path).unwrap().exif;
            let exif = exif.unwrap_or_else(|| panic!("{name} lost its EXIF block"));
            assert_eq!(read_orientation(&exif).unwrap(), Some(6), "{name}");
        }
    }

    #[test]
    fn save_tiff_drops_exif_without_failing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tagged.tiff");
        let backend = RustBackend::new();
        let photo = Photo::new(marker_image(12, 7)).with_exif(exif_with_orientation(6));

        backend.save(&photo, &path, Quality::default()).unwrap();
        assert!(backend.load(&path).unwrap().exif.is_none());
    }
}
