use std::collections::HashMap;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};

use crate::archive::{self, Outcome};
use crate::error::{InvalidRootError, MoveError};
use crate::metadata;
use crate::resolve;
use crate::scan::{self, MediaEntry, MediaKind};
use crate::settings::Settings;

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub archived: usize,
    pub duplicates: usize,
    pub undated: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Archive every media file sitting directly in the configured directory.
///
/// One bad file never aborts the run; only a missing or non-directory
/// source path is fatal.
pub fn run(settings: &Settings) -> Result<RunSummary, InvalidRootError> {
    if !settings.media_dir.is_dir() {
        return Err(InvalidRootError {
            path: settings.media_dir.clone(),
        });
    }

    let mut summary = RunSummary::default();
    let mut media = Vec::new();
    for path in scan::list_entries(&settings.media_dir) {
        match scan::classify(&path) {
            MediaKind::Ignored => summary.ignored += 1,
            kind => media.push((path, kind)),
        }
    }

    let progress = ProgressBar::new(media.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()), // safe: static template string
    );

    for (path, kind) in media {
        match process_entry(&path, kind, settings) {
            Ok(Outcome::Moved(dest)) => {
                eprintln!("MOVE {} -> {}", path.display(), dest.display());
                summary.archived += 1;
            }
            Ok(Outcome::DuplicateIgnored) => {
                eprintln!("DUPLICATE {} ignored", path.display());
                summary.duplicates += 1;
            }
            Ok(Outcome::NoDate) => {
                eprintln!("SKIPPED {} (no date)", path.display());
                summary.undated += 1;
            }
            Err(e) => {
                eprintln!("ERROR: {e}");
                summary.failed += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(summary)
}

fn process_entry(
    path: &Path,
    kind: MediaKind,
    settings: &Settings,
) -> Result<Outcome, MoveError> {
    let tags = match kind {
        MediaKind::Photo => match metadata::read_tags(path) {
            Ok(tags) => tags,
            Err(e) => {
                // Unreadable metadata means no embedded date, nothing more.
                debug!("{e}");
                HashMap::new()
            }
        },
        _ => HashMap::new(),
    };
    let entry = MediaEntry::new(path.to_path_buf(), tags);
    debug!("processing {} ({})", entry.path.display(), entry.extension);

    let date = match resolve::resolve(&entry, kind, settings) {
        Ok(date) => date,
        Err(e) => {
            warn!("{e}");
            None
        }
    };
    if let Some(resolved) = &date {
        debug!(
            "{}: date {} from {:?}",
            entry.path.display(),
            resolved.datetime,
            resolved.source
        );
    }

    archive::archive(&entry, date.as_ref(), kind, settings)
}
