//! flacmeta - a defensive decoder for FLAC metadata blocks
//!
//! Reads the metadata section that precedes the audio frames of a native
//! FLAC stream: stream parameters, Vorbis comments, seek points, pictures,
//! cue sheets and application data. Audio frames are never decoded.
//!
//! ```no_run
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = File::open("track.flac")?;
//! let metadata = flacmeta::decode_metadata(&mut file)?;
//! println!("{} Hz, {:?}", metadata.sample_rate, metadata.duration);
//! println!("artist: {:?}", metadata.tag("artist"));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

pub mod catalog;
pub mod error;
pub mod flac;
pub mod utils;

pub use catalog::TrackRecord;
pub use error::{BlockError, DecodeError};
pub use flac::{
    decode_metadata, decode_metadata_with, is_flac, Application, CueIndex, CueSheet, CueTrack,
    DecodeOptions, Picture, PictureType, SeekPoint, StreamInfo,
};

use utils::serialize;

/// Container format of a decoded stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AudioFormat {
    #[default]
    #[serde(rename = "FLAC")]
    Flac,
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioFormat::Flac => f.write_str("FLAC"),
        }
    }
}

/// Audio metadata structure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub format: AudioFormat,
    /// Total length of the source stream in bytes
    pub size: u64,

    pub min_block_size: u16,
    pub max_block_size: u16,
    pub min_frame_size: u32,
    pub max_frame_size: u32,
    pub sample_rate: u32,
    pub channels: u8,
    pub bits_per_sample: u8,
    pub total_samples: u64,
    #[serde(serialize_with = "serialize::hex")]
    pub md5_signature: [u8; 16],

    /// Derived from `total_samples / sample_rate`; zero when unknown
    #[serde(rename = "duration_secs", serialize_with = "serialize::seconds")]
    pub duration: Duration,

    pub vendor: String,
    /// First value of each comment key
    pub tags: BTreeMap<String, String>,
    /// Every value of each comment key, in stream order
    pub tags_multi: BTreeMap<String, Vec<String>>,

    pub seek_table: Vec<SeekPoint>,
    pub pictures: Vec<Picture>,
    pub cue_sheet: Option<CueSheet>,
    pub applications: Vec<Application>,
}

impl Metadata {
    /// Open and decode a file with default limits
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        Self::from_path_with(path, &DecodeOptions::default())
    }

    pub fn from_path_with(
        path: impl AsRef<Path>,
        options: &DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Decoding FLAC metadata");

        let mut reader = BufReader::new(File::open(path)?);
        decode_metadata_with(&mut reader, options)
    }

    /// First non-blank value for `key`, looked up case-insensitively
    pub fn tag(&self, key: &str) -> Option<&str> {
        let key = key.trim().to_uppercase();
        if let Some(value) = self.tags.get(&key).map(|v| v.trim()) {
            if !value.is_empty() {
                return Some(value);
            }
        }
        self.tags_multi
            .get(&key)?
            .iter()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// Raw PCM bitrate in kbit/s, zero when any parameter is unknown
    pub fn bitrate_kbps(&self) -> u64 {
        if self.sample_rate == 0 || self.bits_per_sample == 0 || self.channels == 0 {
            return 0;
        }
        self.sample_rate as u64 * self.bits_per_sample as u64 * self.channels as u64 / 1000
    }

    /// Front cover if present, otherwise the first picture
    pub fn front_cover(&self) -> Option<&Picture> {
        self.pictures
            .iter()
            .find(|p| p.kind() == PictureType::CoverFront)
            .or_else(|| self.pictures.first())
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metadata({}, {} Hz, {} ch, {} bit, {:.3}s, title={}, artist={}, album={})",
            self.format,
            self.sample_rate,
            self.channels,
            self.bits_per_sample,
            self.duration.as_secs_f64(),
            self.tag(flac::VorbisFields::TITLE).unwrap_or("None"),
            self.tag(flac::VorbisFields::ARTIST).unwrap_or("None"),
            self.tag(flac::VorbisFields::ALBUM).unwrap_or("None"),
        )
    }
}

/// Audio file metadata handler
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub path: PathBuf,
    pub file_type: String,
}

impl AudioFile {
    /// Open a file and detect its type
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DecodeError> {
        let path = path.into();
        let file_type = Self::detect_file_type(&path)?;
        Ok(AudioFile { path, file_type })
    }

    /// Detect file type: `"flac"` or `"unknown"`
    pub fn detect_file_type(path: &Path) -> Result<String, DecodeError> {
        let mut reader = BufReader::new(File::open(path)?);
        if is_flac(&mut reader) {
            return Ok("flac".to_string());
        }
        Ok("unknown".to_string())
    }

    pub fn is_flac(&self) -> bool {
        self.file_type == "flac"
    }

    /// Read metadata from the audio file
    pub fn read_metadata(&self) -> Result<Metadata, DecodeError> {
        if !self.is_flac() {
            return Err(DecodeError::UnsupportedFormat);
        }
        Metadata::from_path(&self.path)
    }

    /// Extract the front cover (or first picture) from the audio file
    pub fn extract_cover(&self) -> Result<Option<Picture>, DecodeError> {
        let metadata = self.read_metadata()?;
        Ok(metadata.front_cover().cloned())
    }
}
