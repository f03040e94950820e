use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use media_archiver::organize;
use media_archiver::settings::{DEFAULT_DUPLICATE_SUFFIX, Settings};

#[derive(Parser)]
#[command(name = "media-archiver")]
#[command(about = "Archive photos and videos into year-based folders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move media files from a directory into the year-based archive
    Archive {
        /// Directory containing the media files
        #[arg(required_unless_present = "config")]
        media_dir: Option<PathBuf>,
        /// Read all settings from a JSON config file instead of flags
        #[arg(long, conflicts_with = "media_dir")]
        config: Option<PathBuf>,
        /// Archive under this root instead of the media directory itself
        #[arg(long)]
        archive_root: Option<PathBuf>,
        /// Suffix inserted between file stem and collision counter
        #[arg(long, default_value = DEFAULT_DUPLICATE_SUFFIX, allow_hyphen_values = true)]
        duplicate_suffix: String,
        /// File undated media under the current year
        #[arg(long)]
        put_no_date_media_this_year: bool,
        /// Keep videos in a dedicated video/ subfolder per year
        #[arg(long)]
        video_folder: bool,
        /// Date undated photos from filesystem timestamps
        #[arg(long)]
        creation_time_fallback: bool,
        /// Skip files whose name already exists in the target folder
        #[arg(long)]
        ignore_duplicate: bool,
        /// Verbose per-file diagnostics
        #[arg(long)]
        print_debug: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Commands::Archive {
        media_dir,
        config,
        archive_root,
        duplicate_suffix,
        put_no_date_media_this_year,
        video_folder,
        creation_time_fallback,
        ignore_duplicate,
        print_debug,
    } = cli.command;

    let settings = if let Some(config) = config {
        match Settings::load(&config) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("ERROR: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        // required_unless_present: clap rejects the bare form without a dir
        let mut settings = Settings::new(media_dir.unwrap_or_default());
        if let Some(root) = archive_root {
            settings.archive_root = root;
        }
        settings.duplicate_suffix = duplicate_suffix;
        settings.put_no_date_media_this_year = put_no_date_media_this_year;
        settings.video_folder = video_folder;
        settings.creation_time_fallback = creation_time_fallback;
        settings.ignore_duplicate = ignore_duplicate;
        settings.print_debug = print_debug;
        settings
    };

    init_logging(settings.print_debug);

    match organize::run(&settings) {
        Ok(summary) => {
            println!(
                "{} archived, {} duplicates, {} undated, {} ignored, {} failed",
                summary.archived,
                summary.duplicates,
                summary.undated,
                summary.ignored,
                summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(print_debug: bool) {
    let default_level = if print_debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
