use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use jiff::tz::TimeZone;
use log::debug;
use sha2::{Digest, Sha256};

use crate::error::MoveError;
use crate::resolve::ResolvedDate;
use crate::scan::{MediaEntry, MediaKind};
use crate::settings::Settings;

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Moved into the archive; carries the destination path.
    Moved(PathBuf),
    /// Same name already present in the target and duplicates are ignored.
    DuplicateIgnored,
    /// No resolvable date and the current-year fallback is disabled; the
    /// file stays where it is.
    NoDate,
}

/// Move `entry` into its archive target.
pub fn archive(
    entry: &MediaEntry,
    date: Option<&ResolvedDate>,
    kind: MediaKind,
    settings: &Settings,
) -> Result<Outcome, MoveError> {
    let Some(target_dir) = target_dir(date, kind, settings) else {
        return Ok(Outcome::NoDate);
    };

    let base_name = entry
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // One snapshot per move decision.
    let existing = list_names(&target_dir)?;

    let final_name = if existing.contains(&base_name) {
        if settings.ignore_duplicate {
            return Ok(Outcome::DuplicateIgnored);
        }
        resolve_collision(&base_name, &existing, &settings.duplicate_suffix)
    } else {
        base_name
    };

    fs::create_dir_all(&target_dir).map_err(|source| MoveError::CreateDir {
        dir: target_dir.clone(),
        source,
    })?;

    let dest = target_dir.join(&final_name);
    move_file(&entry.path, &dest)?;
    Ok(Outcome::Moved(dest))
}

/// `<archive_root>/<year>[/video]`, or `None` when the entry is undated and
/// the current-year fallback is disabled.
fn target_dir(date: Option<&ResolvedDate>, kind: MediaKind, settings: &Settings) -> Option<PathBuf> {
    let year = match date {
        Some(resolved) => resolved.datetime.year(),
        None if settings.put_no_date_media_this_year => current_utc_year(),
        None => return None,
    };

    let mut dir = settings.archive_root.join(format!("{year:04}"));
    if kind == MediaKind::Video && settings.video_folder {
        dir.push("video");
    }
    debug_assert!(dir.starts_with(&settings.archive_root));
    Some(dir)
}

fn current_utc_year() -> i16 {
    Timestamp::now().to_zoned(TimeZone::UTC).year()
}

fn list_names(dir: &Path) -> Result<HashSet<String>, MoveError> {
    let mut names = HashSet::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(names),
        Err(source) => {
            return Err(MoveError::ListTarget {
                dir: dir.to_path_buf(),
                source,
            });
        }
    };
    for entry in entries {
        let entry = entry.map_err(|source| MoveError::ListTarget {
            dir: dir.to_path_buf(),
            source,
        })?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Deterministic collision renaming: `base_name` unchanged when free,
/// otherwise `stem + suffix + counter + extension` with the counter
/// starting at 0.
pub fn resolve_collision(base_name: &str, existing: &HashSet<String>, suffix: &str) -> String {
    if !existing.contains(base_name) {
        return base_name.to_string();
    }

    let name = Path::new(base_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = name
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut index = 0u32;
    loop {
        let candidate = format!("{stem}{suffix}{index}{extension}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Rename when possible; across filesystems fall back to copy, verify the
/// destination content, and only then remove the source.
fn move_file(src: &Path, dest: &Path) -> Result<(), MoveError> {
    match fs::rename(src, dest) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(
                "{} and {} are on different filesystems, copying",
                src.display(),
                dest.display()
            );
        }
        Err(source) => {
            return Err(MoveError::Rename {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source,
            });
        }
    }

    if let Err(source) = fs::copy(src, dest) {
        fs::remove_file(dest).ok();
        return Err(MoveError::Copy {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source,
        });
    }

    let verified = match (hash_file(src), hash_file(dest)) {
        (Ok(src_hash), Ok(dest_hash)) => src_hash == dest_hash,
        _ => false,
    };
    if !verified {
        fs::remove_file(dest).ok();
        return Err(MoveError::Verify {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }

    fs::remove_file(src).map_err(|source| MoveError::RemoveSource {
        src: src.to_path_buf(),
        source,
    })
}

fn hash_file(path: &Path) -> io::Result<[u8; 32]> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(hasher.finalize().into())
}
