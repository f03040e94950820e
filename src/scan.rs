use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// What the archiver does with a directory entry, decided from the file
/// extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Ignored,
}

/// One media file under consideration: source path, lowercase extension and
/// the raw embedded tags read for it.
#[derive(Debug, Clone)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub extension: String,
    pub tags: HashMap<String, String>,
}

impl MediaEntry {
    pub fn new(path: PathBuf, tags: HashMap<String, String>) -> MediaEntry {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        MediaEntry {
            path,
            extension,
            tags,
        }
    }
}

pub fn classify(path: &Path) -> MediaKind {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" | "jpg" | "jpeg" => MediaKind::Photo,
        "mp4" | "mov" => MediaKind::Video,
        _ => MediaKind::Ignored,
    }
}

/// Immediate file entries of `dir`. Subdirectories are not entered and
/// unreadable entries are dropped.
pub fn list_entries(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
