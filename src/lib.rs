//! # EXIF Thumbnailer
//!
//! Batch thumbnail generation for phone photos, with the EXIF orientation tag
//! either kept or baked into the pixels.
//!
//! Phones store photos in sensor order and record how to turn them upright in
//! the EXIF `Orientation` tag. Viewers that ignore the tag show those photos
//! sideways or mirrored. This crate produces two sets of thumbnails from one
//! source directory so the difference can be compared side by side:
//!
//! ```text
//! Images/iPhone/IMG_0001.jpg
//!   ├─ with EXIF     → Thumbnails/WithExif/IMG_0001 300x400.jpg
//!   │                  (resized, EXIF untouched, still relies on the tag)
//!   └─ without EXIF  → Thumbnails/WithoutExif/IMG_0001 300x400.jpg
//!                      (rotated/flipped upright, EXIF removed, then resized)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Photo handle, orientation normalization, resize, backend trait |
//! | [`scan`] | Lists the images directly inside a directory |
//! | [`naming`] | `<stem> <w>x<h>.<ext>` output names |
//! | [`process`] | One thumbnail pass over a directory, resilient per file |
//! | [`inspect`] | Reports the raw orientation tag of every image in a directory |
//! | [`config`] | `thumbnailer.toml` loading, merging, and validation |
//! | [`output`] | CLI report formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Normalize Before Resize
//!
//! The orientation correction runs on the full-size pixels and the result is
//! then fitted into the thumbnail box. A portrait photo stored in landscape
//! sensor order therefore fills a portrait box instead of being shrunk as a
//! landscape and turned afterwards.
//!
//! ## One Bad File Never Stops a Pass
//!
//! Decode failures, invalid orientation values and write errors are reported
//! per file and the pass carries on. Only a missing source directory or an
//! uncreatable destination aborts it. The CLI exits non-zero when anything
//! failed.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, encoding and resampling use the `image` crate; EXIF parsing uses
//! `kamadak-exif`. There are no system library dependencies.

pub mod config;
pub mod imaging;
pub mod inspect;
pub mod logging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
