use clap::{Parser, Subcommand};
use exif_thumbnailer::config::{self, ResolvedPaths, ThumbnailerConfig};
use exif_thumbnailer::imaging::{ExifPolicy, RustBackend, ThumbnailSize};
use exif_thumbnailer::process::{self, BatchOptions};
use exif_thumbnailer::{inspect, logging, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "exif-thumbnailer")]
#[command(about = "Batch thumbnails with and without EXIF orientation")]
#[command(long_about = "\
Batch thumbnails with and without EXIF orientation

Reads every photo directly inside the source directory and writes two sets of
thumbnails:

  <root>/
  ├── thumbnailer.toml          # Optional config (see gen-config)
  ├── Images/iPhone/            # Source photos
  │   └── IMG_0001.jpg
  └── Thumbnails/
      ├── WithExif/             # Resized only, EXIF kept
      │   └── IMG_0001 300x400.jpg
      └── WithoutExif/          # Orientation applied to the pixels, EXIF removed
          └── IMG_0001 300x400.jpg

Thumbnails fit inside the requested box with the aspect ratio kept. A file that
cannot be read or carries an invalid orientation value is reported and skipped;
the exit code is non-zero if any file failed.

Run 'exif-thumbnailer gen-config' to generate a documented thumbnailer.toml.")]
#[command(version)]
struct Cli {
    /// Working root; config and relative paths are resolved against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Thumbnail bounding box, e.g. 300x400 (overrides config)
    #[arg(long, global = true)]
    size: Option<ThumbnailSize>,

    /// JPEG quality 1-100 (overrides config)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Both thumbnail passes, then dump source and destinations
    Run,
    /// Resize only, keeping EXIF
    WithExif,
    /// Apply orientation, strip EXIF, then resize
    WithoutExif,
    /// Print the EXIF orientation of every image in a directory
    Dump {
        /// Directory to inspect (default: configured source)
        dir: Option<PathBuf>,
    },
    /// Print a stock thumbnailer.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    let success = match &cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            true
        }
        Command::Run => {
            let (config, paths) = load_settings(&cli)?;
            let with_exif = run_pass(
                &paths.source,
                &paths.with_exif,
                batch_options(&config, ExifPolicy::Preserve),
            )?;
            println!();
            let without_exif = run_pass(
                &paths.source,
                &paths.without_exif,
                batch_options(&config, ExifPolicy::Normalize),
            )?;
            println!();
            let dumped = dump_all(&paths)?;
            with_exif && without_exif && dumped
        }
        Command::WithExif => {
            let (config, paths) = load_settings(&cli)?;
            run_pass(
                &paths.source,
                &paths.with_exif,
                batch_options(&config, ExifPolicy::Preserve),
            )?
        }
        Command::WithoutExif => {
            let (config, paths) = load_settings(&cli)?;
            run_pass(
                &paths.source,
                &paths.without_exif,
                batch_options(&config, ExifPolicy::Normalize),
            )?
        }
        Command::Dump { dir } => {
            let (_, paths) = load_settings(&cli)?;
            dump(dir.as_deref().unwrap_or(&paths.source))?
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load `thumbnailer.toml` from the root and apply the command-line overrides.
fn load_settings(
    cli: &Cli,
) -> Result<(ThumbnailerConfig, ResolvedPaths), Box<dyn std::error::Error>> {
    let mut config = config::load_config(&cli.root)?;
    if let Some(size) = cli.size {
        config.thumbnail.width = size.width;
        config.thumbnail.height = size.height;
    }
    if let Some(quality) = cli.quality {
        config.thumbnail.quality = quality;
    }
    config.validate()?;
    let paths = config.resolve_paths(&cli.root)?;
    Ok((config, paths))
}

fn batch_options(config: &ThumbnailerConfig, policy: ExifPolicy) -> BatchOptions {
    BatchOptions {
        size: config.size(),
        policy,
        quality: config.quality(),
    }
}

/// Run one pass with a printer thread draining progress events.
/// Returns whether every file succeeded.
fn run_pass(
    source: &Path,
    dest: &Path,
    options: BatchOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let report = process::make_thumbnails(source, dest, &options, Some(tx))?;
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    output::print_batch_summary(&report);
    Ok(report.is_success())
}

/// Dump one directory. Returns whether every file could be inspected.
fn dump(dir: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let report = inspect::inspect_directory(&RustBackend::new(), dir)?;
    output::print_dump_report(&report);
    Ok(report.files.iter().all(|file| file.result.is_ok()))
}

fn dump_all(paths: &ResolvedPaths) -> Result<bool, Box<dyn std::error::Error>> {
    let mut success = true;
    for dir in [&paths.source, &paths.with_exif, &paths.without_exif] {
        success &= dump(dir)?;
        println!();
    }
    Ok(success)
}
