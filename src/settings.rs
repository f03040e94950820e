use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;

pub const DEFAULT_DUPLICATE_SUFFIX: &str = "_dup";

/// Immutable run configuration. Built once from CLI flags or a config file
/// and passed by reference into every component call.
#[derive(Debug, Clone)]
pub struct Settings {
    pub media_dir: PathBuf,
    pub archive_root: PathBuf,
    pub duplicate_suffix: String,
    pub put_no_date_media_this_year: bool,
    pub video_folder: bool,
    pub creation_time_fallback: bool,
    pub ignore_duplicate: bool,
    pub print_debug: bool,
}

impl Settings {
    /// Defaults for a media directory: archive in place, rename duplicates
    /// with `_dup`, no undated fallbacks, quiet.
    pub fn new(media_dir: impl Into<PathBuf>) -> Settings {
        let media_dir = media_dir.into();
        Settings {
            archive_root: media_dir.clone(),
            media_dir,
            duplicate_suffix: DEFAULT_DUPLICATE_SUFFIX.to_string(),
            put_no_date_media_this_year: false,
            video_folder: false,
            creation_time_fallback: false,
            ignore_duplicate: false,
            print_debug: false,
        }
    }

    /// Load settings from a JSON config file with `main` and `options`
    /// sections.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SettingsFile =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(file.into_settings())
    }
}

#[derive(Deserialize)]
struct SettingsFile {
    main: MainSection,
    #[serde(default)]
    options: OptionsSection,
}

#[derive(Deserialize)]
struct MainSection {
    media_dir: PathBuf,
    archive_root: Option<PathBuf>,
    #[serde(default = "default_suffix")]
    duplicate_suffix: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OptionsSection {
    put_no_date_media_this_year: bool,
    video_folder: bool,
    creation_time_fallback: bool,
    ignore_duplicate: bool,
    print_debug: bool,
}

fn default_suffix() -> String {
    DEFAULT_DUPLICATE_SUFFIX.to_string()
}

impl SettingsFile {
    fn into_settings(self) -> Settings {
        let MainSection {
            media_dir,
            archive_root,
            duplicate_suffix,
        } = self.main;
        Settings {
            archive_root: archive_root.unwrap_or_else(|| media_dir.clone()),
            media_dir,
            duplicate_suffix,
            put_no_date_media_this_year: self.options.put_no_date_media_this_year,
            video_folder: self.options.video_folder,
            creation_time_fallback: self.options.creation_time_fallback,
            ignore_duplicate: self.options.ignore_duplicate,
            print_debug: self.options.print_debug,
        }
    }
}
