// Error types for FLAC metadata decoding

use std::io;

/// Fatal decode failures. Each variant is one distinguishable condition so
/// callers can decide whether to skip a file or abort.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("unsupported format")]
    UnsupportedFormat,
    #[error("seek failed: {0}")]
    Seek(#[source] io::Error),
    #[error("read flac magic: {0}")]
    ReadMagic(#[source] io::Error),
    #[error("invalid metadata")]
    InvalidMetadata,
    #[error("read metadata header: {0}")]
    ReadHeader(#[source] io::Error),
    #[error("block too large: {length} bytes exceeds limit of {limit}")]
    BlockTooLarge { length: u32, limit: u32 },
    #[error("read metadata payload: {0}")]
    ReadPayload(#[source] io::Error),
    #[error("bad stream info: {0}")]
    BadStreamInfo(#[source] BlockError),
    #[error("tags not found")]
    TagsNotFound,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failures local to a single block payload.
///
/// Only a StreamInfo failure is promoted to [`DecodeError`]; every other
/// block kind is dropped from the result when its decoder fails.
#[derive(thiserror::Error, Debug)]
pub enum BlockError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("stream info too short: {0} bytes")]
    StreamInfoTooShort(usize),
    #[error("picture too large: {length} bytes exceeds limit of {limit}")]
    PictureTooLarge { length: u32, limit: u32 },
    #[error("application block too short: {0} bytes")]
    ApplicationTooShort(usize),
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
