// FLAC metadata block framing

use std::io::Read;

use crate::error::DecodeError;
use crate::utils::io::{be_u24, read_bytes};

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

/// FLAC metadata block types (RFC 9639)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlacMetadataBlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    /// Codes 7..=126, skipped like padding
    Reserved(u8),
    /// Code 127, forbidden by the format
    Invalid,
}

impl FlacMetadataBlockType {
    pub fn from_byte(byte: u8) -> Self {
        match byte & 0x7F {
            0 => FlacMetadataBlockType::StreamInfo,
            1 => FlacMetadataBlockType::Padding,
            2 => FlacMetadataBlockType::Application,
            3 => FlacMetadataBlockType::SeekTable,
            4 => FlacMetadataBlockType::VorbisComment,
            5 => FlacMetadataBlockType::CueSheet,
            6 => FlacMetadataBlockType::Picture,
            127 => FlacMetadataBlockType::Invalid,
            code => FlacMetadataBlockType::Reserved(code),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlacMetadataBlockType::StreamInfo => "STREAMINFO",
            FlacMetadataBlockType::Padding => "PADDING",
            FlacMetadataBlockType::Application => "APPLICATION",
            FlacMetadataBlockType::SeekTable => "SEEKTABLE",
            FlacMetadataBlockType::VorbisComment => "VORBIS_COMMENT",
            FlacMetadataBlockType::CueSheet => "CUESHEET",
            FlacMetadataBlockType::Picture => "PICTURE",
            FlacMetadataBlockType::Reserved(_) => "RESERVED",
            FlacMetadataBlockType::Invalid => "INVALID",
        }
    }
}

/// FLAC metadata block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacMetadataBlockHeader {
    pub is_last: bool,
    pub block_type: FlacMetadataBlockType,
    pub length: u32,
}

/// FLAC metadata block
#[derive(Debug)]
pub struct FlacMetadataBlock {
    pub header: FlacMetadataBlockHeader,
    pub data: Vec<u8>,
}

impl FlacMetadataBlockHeader {
    pub const HEADER_SIZE: usize = 4;

    /// Parse a header from its four raw bytes
    pub fn from_bytes(buffer: [u8; Self::HEADER_SIZE]) -> Self {
        FlacMetadataBlockHeader {
            is_last: (buffer[0] & 0x80) != 0,
            block_type: FlacMetadataBlockType::from_byte(buffer[0]),
            length: be_u24(&[buffer[1], buffer[2], buffer[3]]),
        }
    }

    /// Read FLAC metadata block header from reader
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
        let mut buffer = [0u8; Self::HEADER_SIZE];
        reader
            .read_exact(&mut buffer)
            .map_err(DecodeError::ReadHeader)?;
        Ok(Self::from_bytes(buffer))
    }

    /// Reject payload lengths above `limit`
    pub fn ensure_within(&self, limit: u32) -> Result<(), DecodeError> {
        ensure_block_length(self.length, limit)
    }
}

/// Framing check shared by every block type
pub fn ensure_block_length(length: u32, limit: u32) -> Result<(), DecodeError> {
    if length > limit {
        return Err(DecodeError::BlockTooLarge { length, limit });
    }
    Ok(())
}

impl FlacMetadataBlock {
    /// Read a header and its payload, refusing payloads larger than `limit`
    pub fn read<R: Read>(reader: &mut R, limit: u32) -> Result<Self, DecodeError> {
        let header = FlacMetadataBlockHeader::read(reader)?;
        header.ensure_within(limit)?;
        let data =
            read_bytes(reader, header.length as usize).map_err(DecodeError::ReadPayload)?;

        Ok(FlacMetadataBlock { header, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_fields_unpack() {
        let header = FlacMetadataBlockHeader::from_bytes([0x84, 0x01, 0x02, 0x03]);
        assert!(header.is_last);
        assert_eq!(header.block_type, FlacMetadataBlockType::VorbisComment);
        assert_eq!(header.length, 0x010203);
    }

    #[test]
    fn reserved_and_invalid_codes() {
        assert_eq!(
            FlacMetadataBlockType::from_byte(7),
            FlacMetadataBlockType::Reserved(7)
        );
        assert_eq!(
            FlacMetadataBlockType::from_byte(126),
            FlacMetadataBlockType::Reserved(126)
        );
        assert_eq!(
            FlacMetadataBlockType::from_byte(0xFF),
            FlacMetadataBlockType::Invalid
        );
    }

    #[test]
    fn oversized_length_is_rejected() {
        let err = ensure_block_length(33 << 20, 32 << 20).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BlockTooLarge { length, .. } if length == 33 << 20
        ));
        assert!(ensure_block_length(32 << 20, 32 << 20).is_ok());
    }

    #[test]
    fn truncated_header_is_a_header_error() {
        let mut cursor = Cursor::new(vec![0x80, 0x00]);
        let err = FlacMetadataBlock::read(&mut cursor, 1024).unwrap_err();
        assert!(matches!(err, DecodeError::ReadHeader(_)));
    }

    #[test]
    fn truncated_payload_is_a_payload_error() {
        let mut cursor = Cursor::new(vec![0x81, 0x00, 0x00, 0x08, 0x00, 0x00]);
        let err = FlacMetadataBlock::read(&mut cursor, 1024).unwrap_err();
        assert!(matches!(err, DecodeError::ReadPayload(_)));
    }

    #[test]
    fn reads_payload() {
        let mut cursor = Cursor::new(vec![0x01, 0x00, 0x00, 0x02, 0xAA, 0xBB, 0xCC]);
        let block = FlacMetadataBlock::read(&mut cursor, 1024).unwrap();
        assert!(!block.header.is_last);
        assert_eq!(block.header.block_type, FlacMetadataBlockType::Padding);
        assert_eq!(block.data, vec![0xAA, 0xBB]);
    }
}
