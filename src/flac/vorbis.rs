// VORBIS_COMMENT implementation for FLAC

use std::io::{self, Cursor, Read};

use crate::utils::encoding::decode_utf8;
use crate::utils::io::{read_bytes, read_le_u32, read_lp_string_le};

/// Vorbis comment structure
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VorbisComment {
    pub vendor_string: String,
    /// Normalized `(KEY, value)` pairs in stream order
    pub comments: Vec<(String, String)>,
}

impl VorbisComment {
    /// Parse a VORBIS_COMMENT payload.
    ///
    /// Decoding is best-effort: a truncated vendor string yields an empty
    /// comment, and a truncated entry list keeps the entries read so far.
    pub fn read_from_data(data: &[u8]) -> Self {
        let mut comment = VorbisComment::default();
        if let Err(e) = comment.read_into(&mut Cursor::new(data)) {
            tracing::debug!(
                error = %e,
                entries = comment.comments.len(),
                "Vorbis comment truncated, keeping partial entries"
            );
        }
        comment
    }

    fn read_into<R: Read>(&mut self, reader: &mut R) -> io::Result<()> {
        // Vendor string (little-endian length prefix)
        self.vendor_string = read_lp_string_le(reader)?;

        let comment_count = read_le_u32(reader)?;
        for _ in 0..comment_count {
            let comment_length = read_le_u32(reader)? as usize;
            if comment_length == 0 {
                continue;
            }

            let comment_bytes = read_bytes(reader, comment_length)?;
            if let Some(pair) = parse_comment(&decode_utf8(&comment_bytes)) {
                self.comments.push(pair);
            }
        }

        Ok(())
    }
}

/// Split a `KEY=value` entry on its first `=`.
///
/// The key is trimmed and upper-cased, the value trimmed. Entries without
/// `=` yield `None`.
pub fn parse_comment(entry: &str) -> Option<(String, String)> {
    let (field, value) = entry.split_once('=')?;
    Some((field.trim().to_uppercase(), value.trim().to_string()))
}

/// Common Vorbis comment field names
pub struct VorbisFields;
impl VorbisFields {
    pub const TITLE: &str = "TITLE";
    pub const ARTIST: &str = "ARTIST";
    pub const ALBUM: &str = "ALBUM";
    pub const ALBUMARTIST: &str = "ALBUMARTIST";
    pub const DATE: &str = "DATE";
    pub const TRACKNUMBER: &str = "TRACKNUMBER";
}
