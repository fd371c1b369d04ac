// Encoding utilities

use encoding_rs::UTF_8;

/// Decode UTF-8 text, replacing malformed sequences.
///
/// BOM handling is disabled so the bytes of a field are never silently
/// shortened.
pub fn decode_utf8(data: &[u8]) -> String {
    UTF_8.decode_without_bom_handling(data).0.into_owned()
}

/// Decode a fixed-width ASCII field and strip its trailing NUL/space padding
pub fn decode_padded(data: &[u8]) -> String {
    decode_utf8(data)
        .trim_end_matches(['\0', ' '])
        .to_string()
}
