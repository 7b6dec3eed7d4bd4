//! Thumbnailer configuration.
//!
//! All settings live in one explicit [`ThumbnailerConfig`] built at startup
//! and handed to whatever needs it. Nothing is computed into process-wide
//! state.
//!
//! ## Config File Location
//!
//! `thumbnailer.toml` in the working root (the current directory unless
//! `--root` is given). The file is optional; without it the stock defaults
//! reproduce the classic layout:
//!
//! ```text
//! <root>/
//! ├── thumbnailer.toml          # optional
//! ├── Images/iPhone/            # source photos
//! └── Thumbnails/
//!     ├── WithExif/             # resized, EXIF untouched
//!     └── WithoutExif/          # orientation applied, EXIF stripped
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! source = "Images/iPhone"              # relative to the root, or absolute
//! with_exif = "Thumbnails/WithExif"
//! without_exif = "Thumbnails/WithoutExif"
//!
//! [thumbnail]
//! width = 300                           # bounding box, aspect ratio kept
//! height = 400
//! quality = 90                          # JPEG quality (1-100)
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, ThumbnailSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the root directory.
pub const CONFIG_FILE: &str = "thumbnailer.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Thumbnailer configuration loaded from `thumbnailer.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailerConfig {
    /// Where photos are read from and thumbnails written to.
    pub paths: PathsConfig,
    /// Thumbnail box and encoding settings.
    pub thumbnail: ThumbnailConfig,
}

/// Source and destination directories. Relative entries are resolved
/// against the root directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub with_exif: PathBuf,
    pub without_exif: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("Images/iPhone"),
            with_exif: PathBuf::from("Thumbnails/WithExif"),
            without_exif: PathBuf::from("Thumbnails/WithoutExif"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub height: u32,
    pub quality: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        let size = ThumbnailSize::default();
        Self {
            width: size.width,
            height: size.height,
            quality: Quality::default().value(),
        }
    }
}

/// Absolute directories derived from [`PathsConfig`] and a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub with_exif: PathBuf,
    pub without_exif: PathBuf,
}

impl ThumbnailerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.width and thumbnail.height must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::Validation(
                "thumbnail.quality must be 1-100".into(),
            ));
        }
        for (key, path) in [
            ("paths.source", &self.paths.source),
            ("paths.with_exif", &self.paths.with_exif),
            ("paths.without_exif", &self.paths.without_exif),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn size(&self) -> ThumbnailSize {
        ThumbnailSize::new(self.thumbnail.width, self.thumbnail.height)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.thumbnail.quality)
    }

    /// Join relative paths onto `root`, made absolute against the current
    /// directory first; absolute entries are kept as they are.
    pub fn resolve_paths(&self, root: &Path) -> Result<ResolvedPaths, ConfigError> {
        let root = std::path::absolute(root)?;
        Ok(ResolvedPaths {
            source: root.join(&self.paths.source),
            with_exif: root.join(&self.paths.with_exif),
            without_exif: root.join(&self.paths.without_exif),
        })
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ThumbnailerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `thumbnailer.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ThumbnailerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ThumbnailerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `thumbnailer.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<ThumbnailerConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    if overlay.is_some() {
        tracing::debug!(path = %root.join(CONFIG_FILE).display(), "loaded config file");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `thumbnailer.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# exif-thumbnailer configuration
# ==============================
#
# Place this file in the directory you run exif-thumbnailer from (or pass
# --root). Every key is optional; delete what you don't change.

[paths]
# Directory holding the source photos. Only files directly inside it are
# processed. Relative paths are resolved against the root directory.
source = "Images/iPhone"

# Thumbnails that keep the original EXIF block, orientation tag included.
# TIFF sources are the exception: TIFF output is written without EXIF.
with_exif = "Thumbnails/WithExif"

# Thumbnails with the orientation baked into the pixels and EXIF removed.
# These display upright in viewers that ignore EXIF.
without_exif = "Thumbnails/WithoutExif"

[thumbnail]
# Bounding box in pixels. The aspect ratio is kept, so one side may end up
# smaller. The box also names the output: "IMG_0001 300x400.jpg".
width = 300
height = 400

# JPEG encoding quality (1-100). PNG, WebP and TIFF output is lossless.
quality = 90
"##
}
