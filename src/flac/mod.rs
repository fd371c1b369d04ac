// FLAC metadata handling module

pub mod application;
pub mod cue_sheet;
pub mod decoder;
pub mod metadata;
pub mod picture;
pub mod seek_table;
pub mod stream_info;
pub mod vorbis;

pub use application::Application;
pub use cue_sheet::{CueIndex, CueSheet, CueTrack};
pub use decoder::{decode_metadata, decode_metadata_with, is_flac, DecodeOptions};
pub use metadata::{
    FlacMetadataBlock, FlacMetadataBlockHeader, FlacMetadataBlockType, FLAC_SIGNATURE,
};
pub use picture::{Picture, PictureType};
pub use seek_table::SeekPoint;
pub use stream_info::StreamInfo;
pub use vorbis::{VorbisComment, VorbisFields};
