// FLAC CUESHEET block implementation
//
// Layout:
// - Media catalog number (128 bytes, NUL padded)
// - Lead-in samples (8 bytes)
// - Flags (1 byte, bit 7 = compact disc) + 258 reserved bytes
// - Track count (1 byte), then per track:
//   - Offset (8 bytes), number (1 byte), ISRC (12 bytes)
//   - Flags (1 byte, bit 7 = non-audio, bit 6 = pre-emphasis) + 13 reserved bytes
//   - Index count (1 byte), then per index: offset (8), number (1), 3 reserved

use std::io::{self, Cursor, Read};

use serde::Serialize;

use crate::utils::encoding::decode_padded;
use crate::utils::io::{read_be_u64, read_bytes, read_u8, skip};

const MEDIA_CATALOG_LENGTH: usize = 128;
const ISRC_LENGTH: usize = 12;
const SHEET_RESERVED: u64 = 258;
const TRACK_RESERVED: u64 = 13;
const INDEX_RESERVED: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CueIndex {
    pub offset: u64,
    pub number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueTrack {
    pub offset: u64,
    pub number: u8,
    pub isrc: String,
    pub is_audio: bool,
    pub pre_emphasis: bool,
    pub index_entries: Vec<CueIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueSheet {
    pub media_catalog: String,
    pub lead_in: u64,
    pub is_cd: bool,
    pub tracks: Vec<CueTrack>,
}

impl CueSheet {
    /// Parse a CUESHEET payload. Any truncation discards the whole sheet.
    pub fn read_from_data(data: &[u8]) -> io::Result<Self> {
        let mut cursor = Cursor::new(data);

        let media_catalog = decode_padded(&read_bytes(&mut cursor, MEDIA_CATALOG_LENGTH)?);
        let lead_in = read_be_u64(&mut cursor)?;
        let is_cd = read_u8(&mut cursor)? & 0x80 != 0;
        skip(&mut cursor, SHEET_RESERVED)?;

        let track_count = read_u8(&mut cursor)?;
        let tracks = (0..track_count)
            .map(|_| CueTrack::read(&mut cursor))
            .collect::<io::Result<Vec<_>>>()?;

        Ok(CueSheet {
            media_catalog,
            lead_in,
            is_cd,
            tracks,
        })
    }
}

impl CueTrack {
    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let offset = read_be_u64(reader)?;
        let number = read_u8(reader)?;
        let isrc = decode_padded(&read_bytes(reader, ISRC_LENGTH)?);

        let flags = read_u8(reader)?;
        skip(reader, TRACK_RESERVED)?;

        let index_count = read_u8(reader)?;
        let index_entries = (0..index_count)
            .map(|_| CueIndex::read(&mut *reader))
            .collect::<io::Result<Vec<_>>>()?;

        Ok(CueTrack {
            offset,
            number,
            isrc,
            is_audio: flags & 0x80 == 0,
            pre_emphasis: flags & 0x40 != 0,
            index_entries,
        })
    }
}

impl CueIndex {
    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let offset = read_be_u64(reader)?;
        let number = read_u8(reader)?;
        skip(reader, INDEX_RESERVED)?;
        Ok(CueIndex { offset, number })
    }
}
