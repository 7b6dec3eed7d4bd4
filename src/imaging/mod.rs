//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode / encode** | `image` codecs (JPEG, PNG, TIFF, WebP) |
//! | **EXIF orientation** | `kamadak-exif` tag lookup + `image` flips/rotations |
//! | **Thumbnail** | `DynamicImage::resize` with Lanczos3, aspect preserved |
//!
//! The module is split into:
//! - **Photo**: the decoded image handle with its raw EXIF block
//! - **Orientation**: the tag → transform table and [`normalize`]
//! - **Parameters**: sizes, quality, EXIF policy
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: thumbnail creation on a loaded photo

pub mod backend;
pub mod operations;
pub mod orientation;
mod params;
pub mod photo;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use operations::{OperationError, ThumbnailOutcome, make_thumbnail};
pub use orientation::{Normalized, OrientationError, Transform, normalize, read_orientation};
pub use params::{ExifPolicy, Quality, ThumbnailSize};
pub use photo::Photo;
pub use rust_backend::{RustBackend, supported_input_extensions};
