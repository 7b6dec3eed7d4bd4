//! CLI output formatting for thumbnail passes and EXIF dumps.
//!
//! Stdout carries the report; diagnostics go through `tracing` to stderr.
//!
//! # Output Format
//!
//! ## Thumbnail pass
//!
//! ```text
//! Without EXIF: /photos/Images/iPhone → /photos/Thumbnails/WithoutExif (3 images)
//!     001 IMG_0001.jpg → IMG_0001 300x400.jpg (300x400)
//!     002 IMG_0002.jpg failed
//!         Error: Unexpected EXIF orientation value 9
//!     003 IMG_0003.jpg → IMG_0003 300x400.jpg (300x225)
//! Wrote 2 thumbnails, 1 failed
//! ```
//!
//! The size in parentheses is the pixel size actually written.
//!
//! ## Dump
//!
//! ```text
//! Directory: /photos/Images/iPhone
//! File: /photos/Images/iPhone/IMG_0001.jpg NO EXIF DATA
//! File: /photos/Images/iPhone/IMG_0002.jpg
//!     Orientation: 6
//! File: /photos/Images/iPhone/IMG_0003.jpg
//!     Error: Malformed EXIF block: ...
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::inspect::{DirectoryReport, ExifSummary};
use crate::process::{BatchReport, ProcessEvent};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Thumbnail pass output
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted {
            policy,
            source_dir,
            dest_dir,
            image_count,
        } => vec![format!(
            "{}: {} → {} ({} images)",
            policy.label(),
            source_dir.display(),
            dest_dir.display(),
            image_count
        )],
        ProcessEvent::ThumbnailWritten {
            index,
            source,
            output,
            width,
            height,
            ..
        } => vec![format!(
            "{}{} {} → {} ({}x{})",
            indent(1),
            format_index(*index),
            file_name(source),
            file_name(output),
            width,
            height
        )],
        ProcessEvent::ThumbnailFailed {
            index,
            source,
            error,
        } => vec![
            format!(
                "{}{} {} failed",
                indent(1),
                format_index(*index),
                file_name(source)
            ),
            format!("{}Error: {}", indent(2), error),
        ],
    }
}

/// Format the closing line of a pass.
pub fn format_batch_summary(report: &BatchReport) -> Vec<String> {
    vec![format!(
        "Wrote {} thumbnails, {} failed",
        report.written.len(),
        report.failures.len()
    )]
}

/// Print the closing line of a pass to stdout.
pub fn print_batch_summary(report: &BatchReport) {
    for line in format_batch_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Dump output
// ============================================================================

/// Format the EXIF orientation report of one directory.
///
/// Files without EXIF fit on one line; everything else gets an indented
/// context line with the raw orientation value or the error.
pub fn format_dump_report(report: &DirectoryReport) -> Vec<String> {
    let mut lines = vec![format!("Directory: {}", report.directory.display())];

    for file in &report.files {
        let path = file.path.display();
        match &file.result {
            Ok(ExifSummary::NoExif) => lines.push(format!("File: {} NO EXIF DATA", path)),
            Ok(ExifSummary::Orientation(Some(value))) => {
                lines.push(format!("File: {}", path));
                lines.push(format!("{}Orientation: {}", indent(1), value));
            }
            Ok(ExifSummary::Orientation(None)) => {
                lines.push(format!("File: {}", path));
                lines.push(format!("{}Orientation: not set", indent(1)));
            }
            Err(error) => {
                lines.push(format!("File: {}", path));
                lines.push(format!("{}Error: {}", indent(1), error));
            }
        }
    }

    lines
}

/// Print the EXIF orientation report of one directory to stdout.
pub fn print_dump_report(report: &DirectoryReport) {
    for line in format_dump_report(report) {
        println!("{}", line);
    }
}
