// Catalog records built from decoded metadata
//
// A record is the shape handed to downstream persistence: one row per
// imported file, with tag fallbacks already applied.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::flac::VorbisFields;
use crate::Metadata;

pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub filename: String,
    pub path: String,
    pub title: String,
    pub album: String,
    pub artist: String,
    pub year: Option<i32>,
    pub track_number: Option<u32>,
    pub duration_secs: f64,
    pub bitrate_kbps: u64,
    pub sample_rate: u32,
    pub channels: u8,
    pub size: u64,
    pub checksum: String,
    pub modified: String,
}

impl TrackRecord {
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let title = metadata
            .tag(VorbisFields::TITLE)
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(path));
        let album = metadata
            .tag(VorbisFields::ALBUM)
            .unwrap_or(UNKNOWN_ALBUM)
            .to_string();
        let artist = metadata
            .tag(VorbisFields::ARTIST)
            .or_else(|| metadata.tag(VorbisFields::ALBUMARTIST))
            .unwrap_or(UNKNOWN_ARTIST)
            .to_string();

        TrackRecord {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.display().to_string(),
            title,
            album,
            artist,
            year: metadata.tag(VorbisFields::DATE).and_then(parse_year),
            track_number: metadata
                .tag(VorbisFields::TRACKNUMBER)
                .and_then(parse_track_number),
            duration_secs: metadata.duration.as_secs_f64(),
            bitrate_kbps: metadata.bitrate_kbps(),
            sample_rate: metadata.sample_rate,
            channels: metadata.channels,
            size: metadata.size,
            checksum: hex::encode(metadata.md5_signature),
            modified: modified_time(path).to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Year from the first four characters of a DATE tag ("1997-05-01" -> 1997)
pub fn parse_year(date: &str) -> Option<i32> {
    let prefix = date.trim().get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Leading integer of a TRACKNUMBER tag ("3/12" -> 3)
pub fn parse_track_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// File modification time, or now when the filesystem cannot tell
fn modified_time(path: &Path) -> DateTime<Utc> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn with_tags(pairs: &[(&str, &str)]) -> Metadata {
        let mut metadata = Metadata::default();
        for (key, value) in pairs {
            metadata.tags.insert(key.to_string(), value.to_string());
            metadata
                .tags_multi
                .insert(key.to_string(), vec![value.to_string()]);
        }
        metadata
    }

    #[test]
    fn falls_back_when_tags_are_missing() {
        let path = PathBuf::from("/music/01 - Intro.flac");
        let record = TrackRecord::from_metadata(&path, &Metadata::default());
        assert_eq!(record.filename, "01 - Intro.flac");
        assert_eq!(record.title, "01 - Intro");
        assert_eq!(record.album, UNKNOWN_ALBUM);
        assert_eq!(record.artist, UNKNOWN_ARTIST);
        assert_eq!(record.year, None);
        assert_eq!(record.checksum, "0".repeat(32));
    }

    #[test]
    fn uses_album_artist_when_artist_is_blank() {
        let mut metadata = with_tags(&[
            ("ARTIST", " "),
            ("ALBUMARTIST", "Various"),
            ("DATE", "1997-05-01"),
            ("TRACKNUMBER", "3/12"),
            ("TITLE", "Song"),
        ]);
        metadata.sample_rate = 48_000;
        metadata.bits_per_sample = 24;
        metadata.channels = 2;
        metadata.duration = Duration::from_secs(90);

        let record = TrackRecord::from_metadata(Path::new("song.flac"), &metadata);
        assert_eq!(record.artist, "Various");
        assert_eq!(record.title, "Song");
        assert_eq!(record.year, Some(1997));
        assert_eq!(record.track_number, Some(3));
        assert_eq!(record.bitrate_kbps, 2304);
        assert_eq!(record.duration_secs, 90.0);
    }

    #[test]
    fn year_parsing() {
        assert_eq!(parse_year("2001"), Some(2001));
        assert_eq!(parse_year("97"), None);
        assert_eq!(parse_year("circa 1990"), None);
    }

    #[test]
    fn track_number_parsing() {
        assert_eq!(parse_track_number("07"), Some(7));
        assert_eq!(parse_track_number("A1"), None);
    }
}
