use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::time::SystemTime;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use log::debug;

use crate::error::ReadError;

/// Embedded original capture time (EXIF `DateTimeOriginal`).
pub const TAG_DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
/// Embedded modification time (TIFF 0x0132, `Image DateTime`).
pub const TAG_MODIFY_DATE: &str = "ModifyDate";

/// Canonical embedded date shape: colon-delimited date, space, time.
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the embedded date tags of `path` as raw strings.
///
/// Only the two fields the resolver consults are surfaced. A file that
/// parses but carries no EXIF payload yields an empty map.
pub fn read_tags(path: &Path) -> Result<HashMap<String, String>, ReadError> {
    let file = File::open(path).map_err(|e| ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let iter = nom_exif::parse_exif(file, None).map_err(|e| ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut tags = HashMap::new();
    let Some(iter) = iter else {
        return Ok(tags);
    };
    let exif: nom_exif::Exif = iter.into();

    let wanted = [
        (nom_exif::ExifTag::DateTimeOriginal, TAG_DATE_TIME_ORIGINAL),
        (nom_exif::ExifTag::ModifyDate, TAG_MODIFY_DATE),
    ];
    for (tag, name) in wanted {
        if let Some(entry) = exif.get(tag) {
            if let Some(value) = entry_value_string(entry) {
                tags.insert(name.to_string(), value);
            }
        }
    }
    Ok(tags)
}

fn entry_value_string(entry: &nom_exif::EntryValue) -> Option<String> {
    if let Some(s) = entry.as_str() {
        return Some(s.trim().to_string());
    }
    // Some writers store these as a typed time value; render it back to the
    // canonical tag shape.
    entry
        .as_time()
        .map(|t| format!("{}", t.format(EXIF_DATE_FORMAT)))
}

/// Earlier of the file's creation and last-modified timestamps, as a UTC
/// civil datetime. `None` when the filesystem metadata cannot be read.
pub fn filesystem_datetime(path: &Path) -> Option<DateTime> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            debug!("no filesystem metadata for {}: {}", path.display(), e);
            return None;
        }
    };
    // Creation timestamps are not available on every platform; the
    // modification timestamp then stands alone.
    let created = meta.created().ok();
    let modified = meta.modified().ok();
    let earliest = match (created, modified) {
        (Some(created), Some(modified)) => Some(if created >= modified { modified } else { created }),
        (created, modified) => created.or(modified),
    }?;
    system_time_utc(earliest)
}

fn system_time_utc(time: SystemTime) -> Option<DateTime> {
    let timestamp = Timestamp::try_from(time).ok()?;
    Some(timestamp.to_zoned(TimeZone::UTC).datetime())
}
