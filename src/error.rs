use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Embedded metadata could not be read at all (missing, corrupt or
/// unsupported file). The resolver treats this as "no embedded date".
#[derive(Error, Debug)]
#[error("cannot read metadata from {path}: {reason}")]
pub struct ReadError {
    pub path: PathBuf,
    pub reason: String,
}

/// A date tag was present but not in the expected `YYYY:MM:DD HH:MM:SS`
/// shape. Ends resolution for the whole entry; lower tiers are not retried.
#[derive(Error, Debug)]
#[error("date tag {tag} in {path} has unexpected format {value:?}")]
pub struct DateParseError {
    pub path: PathBuf,
    pub tag: &'static str,
    pub value: String,
}

/// A single file failed to reach its archive target. The source file is
/// left intact in every variant.
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("failed to create {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {dir}: {source}")]
    ListTarget {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename {src} to {dest}: {source}")]
    Rename {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{dest} does not match {src} after copy")]
    Verify { src: PathBuf, dest: PathBuf },

    #[error("failed to remove source {src} after copy: {source}")]
    RemoveSource {
        src: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The configured source directory is missing or not a directory. Fatal to
/// the whole run, checked before any file is touched.
#[derive(Error, Debug)]
#[error("{path} neither exists nor is a directory")]
pub struct InvalidRootError {
    pub path: PathBuf,
}

/// The config file could not be read or parsed.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
