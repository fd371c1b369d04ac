// FLAC STREAMINFO block implementation

use std::time::Duration;

use crate::error::BlockError;
use crate::utils::io::be_u24;

/// Decoded STREAMINFO parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub min_block_size: u16,
    pub max_block_size: u16,
    pub min_frame_size: u32,
    pub max_frame_size: u32,
    pub sample_rate: u32,
    pub channels: u8,
    pub bits_per_sample: u8,
    pub total_samples: u64,
    pub md5_signature: [u8; 16],
}

impl StreamInfo {
    pub const LENGTH: usize = 34;

    /// Parse a STREAMINFO payload. Bytes past the first 34 are ignored.
    pub fn read_from_data(data: &[u8]) -> Result<Self, BlockError> {
        if data.len() < Self::LENGTH {
            return Err(BlockError::StreamInfoTooShort(data.len()));
        }

        let mut packed_bytes = [0u8; 8];
        packed_bytes.copy_from_slice(&data[10..18]);
        // 20 bits sample rate | 3 bits channels-1 | 5 bits bps-1 | 36 bits samples
        let packed = u64::from_be_bytes(packed_bytes);

        let mut md5_signature = [0u8; 16];
        md5_signature.copy_from_slice(&data[18..34]);

        Ok(StreamInfo {
            min_block_size: u16::from_be_bytes([data[0], data[1]]),
            max_block_size: u16::from_be_bytes([data[2], data[3]]),
            min_frame_size: be_u24(&[data[4], data[5], data[6]]),
            max_frame_size: be_u24(&[data[7], data[8], data[9]]),
            sample_rate: ((packed >> 44) & 0xF_FFFF) as u32,
            channels: (((packed >> 41) & 0x7) + 1) as u8,
            bits_per_sample: (((packed >> 36) & 0x1F) + 1) as u8,
            total_samples: packed & 0xF_FFFF_FFFF,
            md5_signature,
        })
    }

    /// Stream length, or `None` when the sample rate is zero or the quotient
    /// is not a representable interval
    pub fn duration(&self) -> Option<Duration> {
        if self.sample_rate == 0 {
            return None;
        }
        let seconds = self.total_samples as f64 / self.sample_rate as f64;
        if !seconds.is_finite() {
            return None;
        }
        Duration::try_from_secs_f64(seconds).ok()
    }
}
