//! Hand-assembled FLAC streams for integration tests.

#![allow(dead_code)]

pub const STREAMINFO: u8 = 0;
pub const PADDING: u8 = 1;
pub const APPLICATION: u8 = 2;
pub const SEEKTABLE: u8 = 3;
pub const VORBIS_COMMENT: u8 = 4;
pub const CUESHEET: u8 = 5;
pub const PICTURE: u8 = 6;

/// Builder for a FLAC metadata section
#[derive(Default)]
pub struct FlacBuilder {
    blocks: Vec<(u8, Vec<u8>)>,
    trailer: Vec<u8>,
}

impl FlacBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, block_type: u8, payload: Vec<u8>) -> Self {
        self.blocks.push((block_type, payload));
        self
    }

    pub fn stream_info(self, sample_rate: u32, channels: u8, bits: u8, samples: u64) -> Self {
        self.block(STREAMINFO, stream_info(sample_rate, channels, bits, samples))
    }

    pub fn stream_info_md5(self, samples: u64, md5: [u8; 16]) -> Self {
        let mut payload = stream_info(44_100, 2, 16, samples);
        payload[18..].copy_from_slice(&md5);
        self.block(STREAMINFO, payload)
    }

    pub fn comments(self, vendor: &str, entries: &[&str]) -> Self {
        self.block(VORBIS_COMMENT, vorbis_comment(vendor, entries))
    }

    /// Bytes after the metadata section, standing in for audio frames
    pub fn trailer(mut self, bytes: &[u8]) -> Self {
        self.trailer.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = b"fLaC".to_vec();
        let count = self.blocks.len();
        for (i, (block_type, payload)) in self.blocks.into_iter().enumerate() {
            let flag = if i + 1 == count { 0x80 } else { 0x00 };
            let length = payload.len() as u32;
            data.push(flag | block_type);
            data.extend_from_slice(&length.to_be_bytes()[1..]);
            data.extend(payload);
        }
        data.extend(self.trailer);
        data
    }
}

pub fn stream_info(sample_rate: u32, channels: u8, bits: u8, samples: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(34);
    data.extend_from_slice(&4608u16.to_be_bytes());
    data.extend_from_slice(&4608u16.to_be_bytes());
    data.extend_from_slice(&[0x00, 0x02, 0x10]);
    data.extend_from_slice(&[0x00, 0x3A, 0x00]);
    let packed = ((sample_rate as u64) << 44)
        | (((channels - 1) as u64) << 41)
        | (((bits - 1) as u64) << 36)
        | samples;
    data.extend_from_slice(&packed.to_be_bytes());
    data.extend_from_slice(&[
        0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42,
        0x7e,
    ]);
    data
}

pub fn vorbis_comment(vendor: &str, entries: &[&str]) -> Vec<u8> {
    let mut data = (vendor.len() as u32).to_le_bytes().to_vec();
    data.extend_from_slice(vendor.as_bytes());
    data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        data.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        data.extend_from_slice(entry.as_bytes());
    }
    data
}

pub fn picture(picture_type: u32, mime: &str, image: &[u8]) -> Vec<u8> {
    picture_with_length(picture_type, mime, image.len() as u32, image)
}

pub fn picture_with_length(picture_type: u32, mime: &str, declared: u32, image: &[u8]) -> Vec<u8> {
    let mut data = picture_type.to_be_bytes().to_vec();
    data.extend_from_slice(&(mime.len() as u32).to_be_bytes());
    data.extend_from_slice(mime.as_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    for value in [600u32, 600, 24, 0] {
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&declared.to_be_bytes());
    data.extend_from_slice(image);
    data
}

pub fn seek_point(sample_number: u64, offset: u64, frame_samples: u16) -> Vec<u8> {
    let mut data = sample_number.to_be_bytes().to_vec();
    data.extend_from_slice(&offset.to_be_bytes());
    data.extend_from_slice(&frame_samples.to_be_bytes());
    data
}

/// CUESHEET with one audio track carrying a single index
pub fn cue_sheet(catalog: &str, track_offset: u64) -> Vec<u8> {
    let mut data = catalog.as_bytes().to_vec();
    data.resize(128, 0);
    data.extend_from_slice(&88_200u64.to_be_bytes());
    data.push(0x80);
    data.extend(vec![0u8; 258]);
    data.push(1);
    data.extend_from_slice(&track_offset.to_be_bytes());
    data.push(1);
    data.extend_from_slice(b"GBAYE0000351");
    data.push(0x00);
    data.extend(vec![0u8; 13]);
    data.push(1);
    data.extend_from_slice(&0u64.to_be_bytes());
    data.push(1);
    data.extend([0u8; 3]);
    data
}
