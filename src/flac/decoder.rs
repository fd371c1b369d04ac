// Block loop and post-processing for FLAC metadata

use std::collections::BTreeMap;
use std::io::{Read, Seek, SeekFrom};

use crate::error::{DecodeError, Result};
use crate::utils::io::{check_signature, stream_len};
use crate::Metadata;

use super::application::Application;
use super::cue_sheet::CueSheet;
use super::metadata::{FlacMetadataBlock, FlacMetadataBlockType, FLAC_SIGNATURE};
use super::picture::Picture;
use super::seek_table::read_seek_table;
use super::stream_info::StreamInfo;
use super::vorbis::VorbisComment;

/// Size limits applied while decoding untrusted streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest accepted block payload; larger blocks fail the whole decode
    pub max_block_size: u32,
    /// Largest accepted picture data; larger pictures are dropped
    pub max_picture_size: u32,
    /// Application data beyond this is truncated
    pub max_application_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_block_size: 32 << 20,
            max_picture_size: 20 << 20,
            max_application_size: 4 << 20,
        }
    }
}

/// Check the `fLaC` signature at offset 0. I/O failures count as a mismatch.
pub fn is_flac<R: Read + Seek>(reader: &mut R) -> bool {
    check_signature(reader, FLAC_SIGNATURE).unwrap_or(false)
}

/// Decode FLAC metadata with default limits
pub fn decode_metadata<R: Read + Seek>(reader: &mut R) -> Result<Metadata> {
    decode_metadata_with(reader, &DecodeOptions::default())
}

/// Detect the container, rewind, and decode every metadata block
pub fn decode_metadata_with<R: Read + Seek>(
    reader: &mut R,
    options: &DecodeOptions,
) -> Result<Metadata> {
    if !is_flac(reader) {
        return Err(DecodeError::UnsupportedFormat);
    }
    reader.seek(SeekFrom::Start(0)).map_err(DecodeError::Seek)?;

    decode_flac_metadata(reader, options)
}

fn decode_flac_metadata<R: Read + Seek>(
    reader: &mut R,
    options: &DecodeOptions,
) -> Result<Metadata> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(DecodeError::ReadMagic)?;
    if &magic != FLAC_SIGNATURE {
        return Err(DecodeError::InvalidMetadata);
    }

    let mut metadata = Metadata::default();
    let mut stream_info = None;

    loop {
        let block = FlacMetadataBlock::read(reader, options.max_block_size)?;
        let block_type = block.header.block_type;
        tracing::debug!(
            block_type = block_type.name(),
            length = block.header.length,
            is_last = block.header.is_last,
            "Read metadata block"
        );

        match block_type {
            FlacMetadataBlockType::StreamInfo => {
                let info =
                    StreamInfo::read_from_data(&block.data).map_err(DecodeError::BadStreamInfo)?;
                metadata.apply_stream_info(&info);
                stream_info = Some(info);
            }
            FlacMetadataBlockType::VorbisComment => {
                metadata.merge_comment(VorbisComment::read_from_data(&block.data));
            }
            FlacMetadataBlockType::SeekTable => {
                metadata.seek_table.extend(read_seek_table(&block.data));
            }
            FlacMetadataBlockType::Picture => {
                match Picture::read_from_data(&block.data, options.max_picture_size) {
                    Ok(picture) => metadata.pictures.push(picture),
                    Err(e) => tracing::warn!(error = %e, "Dropping picture block"),
                }
            }
            FlacMetadataBlockType::CueSheet => match CueSheet::read_from_data(&block.data) {
                Ok(cue_sheet) => metadata.cue_sheet = Some(cue_sheet),
                Err(e) => tracing::warn!(error = %e, "Dropping cue sheet block"),
            },
            FlacMetadataBlockType::Application => {
                match Application::read_from_data(&block.data, options.max_application_size) {
                    Ok(application) => metadata.applications.push(application),
                    Err(e) => tracing::warn!(error = %e, "Dropping application block"),
                }
            }
            FlacMetadataBlockType::Padding
            | FlacMetadataBlockType::Reserved(_)
            | FlacMetadataBlockType::Invalid => {}
        }

        if block.header.is_last {
            break;
        }
    }

    match stream_len(reader) {
        Ok(size) => metadata.size = size,
        Err(e) => tracing::debug!(error = %e, "Could not determine stream size"),
    }

    if let Some(duration) = stream_info.as_ref().and_then(StreamInfo::duration) {
        metadata.duration = duration;
    }

    metadata.tags = first_values(&metadata.tags_multi);

    if stream_info.is_none() && metadata.tags_multi.is_empty() {
        return Err(DecodeError::TagsNotFound);
    }

    Ok(metadata)
}

fn first_values(tags_multi: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, String> {
    tags_multi
        .iter()
        .filter_map(|(key, values)| values.first().map(|value| (key.clone(), value.clone())))
        .collect()
}

impl Metadata {
    fn apply_stream_info(&mut self, info: &StreamInfo) {
        self.min_block_size = info.min_block_size;
        self.max_block_size = info.max_block_size;
        self.min_frame_size = info.min_frame_size;
        self.max_frame_size = info.max_frame_size;
        self.sample_rate = info.sample_rate;
        self.channels = info.channels;
        self.bits_per_sample = info.bits_per_sample;
        self.total_samples = info.total_samples;
        self.md5_signature = info.md5_signature;
    }

    fn merge_comment(&mut self, comment: VorbisComment) {
        if !comment.vendor_string.is_empty() {
            self.vendor = comment.vendor_string;
        }
        for (key, value) in comment.comments {
            self.tags_multi.entry(key).or_default().push(value);
        }
    }
}
