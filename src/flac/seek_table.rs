// FLAC SEEKTABLE block implementation

use serde::Serialize;

/// One SEEKTABLE record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeekPoint {
    pub sample_number: u64,
    /// Byte offset from the first audio frame
    pub offset: u64,
    pub frame_samples: u16,
}

impl SeekPoint {
    pub const LENGTH: usize = 18;
    pub const PLACEHOLDER: u64 = u64::MAX;

    pub fn is_placeholder(&self) -> bool {
        self.sample_number == Self::PLACEHOLDER
    }

    fn from_record(record: &[u8]) -> Self {
        let mut sample_number = [0u8; 8];
        let mut offset = [0u8; 8];
        sample_number.copy_from_slice(&record[0..8]);
        offset.copy_from_slice(&record[8..16]);
        SeekPoint {
            sample_number: u64::from_be_bytes(sample_number),
            offset: u64::from_be_bytes(offset),
            frame_samples: u16::from_be_bytes([record[16], record[17]]),
        }
    }
}

/// Parse a SEEKTABLE payload. A trailing partial record is ignored.
pub fn read_seek_table(data: &[u8]) -> Vec<SeekPoint> {
    data.chunks_exact(SeekPoint::LENGTH)
        .map(SeekPoint::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sample_number: u64, offset: u64, frame_samples: u16) -> Vec<u8> {
        let mut data = sample_number.to_be_bytes().to_vec();
        data.extend_from_slice(&offset.to_be_bytes());
        data.extend_from_slice(&frame_samples.to_be_bytes());
        data
    }

    #[test]
    fn ignores_trailing_partial_record() {
        let mut data = record(0, 0, 4096);
        data.extend(record(44_100, 12_345, 4096));
        data.extend_from_slice(&[1, 2, 3, 4, 5]);

        let points = read_seek_table(&data);
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[1],
            SeekPoint {
                sample_number: 44_100,
                offset: 12_345,
                frame_samples: 4096
            }
        );
    }

    #[test]
    fn recognizes_placeholder() {
        let points = read_seek_table(&record(u64::MAX, 0, 0));
        assert!(points[0].is_placeholder());
    }

    #[test]
    fn empty_payload_has_no_points() {
        assert!(read_seek_table(&[0u8; 17]).is_empty());
    }
}
