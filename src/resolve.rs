use jiff::civil::DateTime;
use log::debug;

use crate::error::DateParseError;
use crate::metadata::{self, EXIF_DATE_FORMAT, TAG_DATE_TIME_ORIGINAL, TAG_MODIFY_DATE};
use crate::scan::{MediaEntry, MediaKind};
use crate::settings::Settings;

/// Where a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    ExifDateTimeOriginal,
    ExifModifyDate,
    Filesystem,
}

/// The one canonical date of a media entry. Produced at most once per entry
/// and never re-derived.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedDate {
    pub datetime: DateTime,
    pub source: DateSource,
}

/// Embedded tags in priority order. The first present tag is authoritative
/// and ends the chain, valid or not.
const EMBEDDED_CHAIN: [(&str, DateSource); 2] = [
    (TAG_DATE_TIME_ORIGINAL, DateSource::ExifDateTimeOriginal),
    (TAG_MODIFY_DATE, DateSource::ExifModifyDate),
];

/// Resolve the canonical date for `entry`.
///
/// Photos walk the embedded chain and only fall back to filesystem
/// timestamps when enabled. Videos always date from filesystem timestamps.
pub fn resolve(
    entry: &MediaEntry,
    kind: MediaKind,
    settings: &Settings,
) -> Result<Option<ResolvedDate>, DateParseError> {
    match kind {
        MediaKind::Photo => {
            for (tag, source) in EMBEDDED_CHAIN {
                let Some(value) = entry.tags.get(tag) else {
                    continue;
                };
                debug!("{}: {} = {:?}", entry.path.display(), tag, value);
                let datetime = parse_embedded(entry, tag, value)?;
                return Ok(Some(ResolvedDate { datetime, source }));
            }
            if settings.creation_time_fallback {
                return Ok(filesystem_date(entry));
            }
            Ok(None)
        }
        MediaKind::Video => Ok(filesystem_date(entry)),
        MediaKind::Ignored => Ok(None),
    }
}

fn parse_embedded(
    entry: &MediaEntry,
    tag: &'static str,
    value: &str,
) -> Result<DateTime, DateParseError> {
    jiff::fmt::strtime::parse(EXIF_DATE_FORMAT, value)
        .and_then(|parsed| parsed.to_datetime())
        .map_err(|_| DateParseError {
            path: entry.path.clone(),
            tag,
            value: value.to_string(),
        })
}

fn filesystem_date(entry: &MediaEntry) -> Option<ResolvedDate> {
    let datetime = metadata::filesystem_datetime(&entry.path)?;
    debug!("{}: filesystem date {}", entry.path.display(), datetime);
    Some(ResolvedDate {
        datetime,
        source: DateSource::Filesystem,
    })
}
