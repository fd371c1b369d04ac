// I/O utilities for reading metadata block fields

use std::io::{self, Read, Seek, SeekFrom};

use super::encoding::decode_utf8;

/// Read a single byte
pub fn read_u8<R: Read>(reader: &mut R) -> io::Result<u8> {
    let mut buffer = [0u8; 1];
    reader.read_exact(&mut buffer)?;
    Ok(buffer[0])
}

/// Read big-endian 32-bit integer
pub fn read_be_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_be_bytes(buffer))
}

/// Read big-endian 64-bit integer
pub fn read_be_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buffer = [0u8; 8];
    reader.read_exact(&mut buffer)?;
    Ok(u64::from_be_bytes(buffer))
}

/// Read little-endian 32-bit integer
pub fn read_le_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Assemble a big-endian 24-bit integer from three bytes
pub fn be_u24(bytes: &[u8; 3]) -> u32 {
    ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32)
}

/// Read exactly `length` bytes.
///
/// The buffer grows with the data actually delivered, so a forged length
/// field cannot force a large allocation on a short stream.
pub fn read_bytes<R: Read>(reader: &mut R, length: usize) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(length as u64).read_to_end(&mut buffer)?;
    if buffer.len() != length {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, got {}", length, buffer.len()),
        ));
    }
    Ok(buffer)
}

/// Consume and discard exactly `length` bytes
pub fn skip<R: Read>(reader: &mut R, length: u64) -> io::Result<()> {
    let copied = io::copy(&mut reader.take(length), &mut io::sink())?;
    if copied != length {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected to skip {} bytes, skipped {}", length, copied),
        ));
    }
    Ok(())
}

/// Read a string prefixed by its little-endian 32-bit length
pub fn read_lp_string_le<R: Read>(reader: &mut R) -> io::Result<String> {
    let length = read_le_u32(reader)? as usize;
    let bytes = read_bytes(reader, length)?;
    Ok(decode_utf8(&bytes))
}

/// Check if the stream starts with `signature`, leaving the reader at offset 0
pub fn check_signature<R: Read + Seek>(reader: &mut R, signature: &[u8]) -> io::Result<bool> {
    reader.seek(SeekFrom::Start(0))?;
    let mut buffer = vec![0u8; signature.len()];
    let matched = match reader.read_exact(&mut buffer) {
        Ok(()) => buffer == signature,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => false,
        Err(e) => return Err(e),
    };
    reader.seek(SeekFrom::Start(0))?;
    Ok(matched)
}

/// Total length of the stream, restoring the current position afterwards
pub fn stream_len<R: Seek>(reader: &mut R) -> io::Result<u64> {
    let current = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current))?;
    Ok(end)
}
