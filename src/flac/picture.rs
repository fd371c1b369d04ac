// FLAC PICTURE block implementation

use std::fmt;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::BlockError;
use crate::utils::encoding::decode_utf8;
use crate::utils::io::{read_be_u32, read_bytes};
use crate::utils::serialize;

/// Picture types as defined by the FLAC format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureType {
    Other = 0,
    FileIcon = 1,
    OtherFileIcon = 2,
    CoverFront = 3,
    CoverBack = 4,
    LeafletPage = 5,
    Media = 6,
    LeadArtist = 7,
    Artist = 8,
    Conductor = 9,
    Band = 10,
    Composer = 11,
    Lyricist = 12,
    RecordingLocation = 13,
    DuringRecording = 14,
    DuringPerformance = 15,
    VideoScreenCapture = 16,
    BrightColouredFish = 17,
    Illustration = 18,
    BandLogo = 19,
    PublisherLogo = 20,
}

impl PictureType {
    /// Map a raw type code; unknown codes fall back to `Other`
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => PictureType::FileIcon,
            2 => PictureType::OtherFileIcon,
            3 => PictureType::CoverFront,
            4 => PictureType::CoverBack,
            5 => PictureType::LeafletPage,
            6 => PictureType::Media,
            7 => PictureType::LeadArtist,
            8 => PictureType::Artist,
            9 => PictureType::Conductor,
            10 => PictureType::Band,
            11 => PictureType::Composer,
            12 => PictureType::Lyricist,
            13 => PictureType::RecordingLocation,
            14 => PictureType::DuringRecording,
            15 => PictureType::DuringPerformance,
            16 => PictureType::VideoScreenCapture,
            17 => PictureType::BrightColouredFish,
            18 => PictureType::Illustration,
            19 => PictureType::BandLogo,
            20 => PictureType::PublisherLogo,
            _ => PictureType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PictureType::Other => "Other",
            PictureType::FileIcon => "File Icon",
            PictureType::OtherFileIcon => "Other File Icon",
            PictureType::CoverFront => "Cover (front)",
            PictureType::CoverBack => "Cover (back)",
            PictureType::LeafletPage => "Leaflet page",
            PictureType::Media => "Media",
            PictureType::LeadArtist => "Lead artist",
            PictureType::Artist => "Artist",
            PictureType::Conductor => "Conductor",
            PictureType::Band => "Band",
            PictureType::Composer => "Composer",
            PictureType::Lyricist => "Lyricist",
            PictureType::RecordingLocation => "Recording Location",
            PictureType::DuringRecording => "During recording",
            PictureType::DuringPerformance => "During performance",
            PictureType::VideoScreenCapture => "Video screen capture",
            PictureType::BrightColouredFish => "Bright coloured fish",
            PictureType::Illustration => "Illustration",
            PictureType::BandLogo => "Band logo",
            PictureType::PublisherLogo => "Publisher logo",
        }
    }
}

impl fmt::Display for PictureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FLAC PICTURE block structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    pub picture_type: u32,
    pub mime: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub colors: u32,
    #[serde(serialize_with = "serialize::base64")]
    pub data: Vec<u8>,
}

impl Picture {
    /// Read a PICTURE payload, refusing image data larger than `max_data_length`
    pub fn read_from_data(data: &[u8], max_data_length: u32) -> Result<Self, BlockError> {
        let mut cursor = Cursor::new(data);

        let picture_type = read_be_u32(&mut cursor)?;

        let mime_length = read_be_u32(&mut cursor)? as usize;
        let mime = decode_utf8(&read_bytes(&mut cursor, mime_length)?);

        let description_length = read_be_u32(&mut cursor)? as usize;
        let description = decode_utf8(&read_bytes(&mut cursor, description_length)?);

        let width = read_be_u32(&mut cursor)?;
        let height = read_be_u32(&mut cursor)?;
        let depth = read_be_u32(&mut cursor)?;
        let colors = read_be_u32(&mut cursor)?;

        let data_length = read_be_u32(&mut cursor)?;
        if data_length > max_data_length {
            return Err(BlockError::PictureTooLarge {
                length: data_length,
                limit: max_data_length,
            });
        }
        let picture_data = read_bytes(&mut cursor, data_length as usize)?;

        Ok(Picture {
            picture_type,
            mime,
            description,
            width,
            height,
            depth,
            colors,
            data: picture_data,
        })
    }

    pub fn kind(&self) -> PictureType {
        PictureType::from_u32(self.picture_type)
    }

    /// Get file extension based on MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "jpg",
        }
    }

    /// Save the raw image bytes to `path`
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Assemble a PICTURE payload with an explicit declared data length
    pub(crate) fn encode(picture_type: u32, mime: &str, declared: u32, image: &[u8]) -> Vec<u8> {
        let description = "Front";
        let mut data = picture_type.to_be_bytes().to_vec();
        data.extend_from_slice(&(mime.len() as u32).to_be_bytes());
        data.extend_from_slice(mime.as_bytes());
        data.extend_from_slice(&(description.len() as u32).to_be_bytes());
        data.extend_from_slice(description.as_bytes());
        for value in [500u32, 400, 24, 0] {
            data.extend_from_slice(&value.to_be_bytes());
        }
        data.extend_from_slice(&declared.to_be_bytes());
        data.extend_from_slice(image);
        data
    }

    const LIMIT: u32 = 20 << 20;

    #[test]
    fn reads_all_fields() {
        let image = [0xFF, 0xD8, 0xFF, 0xE0];
        let picture =
            Picture::read_from_data(&encode(3, "image/jpeg", 4, &image), LIMIT).unwrap();
        assert_eq!(picture.kind(), PictureType::CoverFront);
        assert_eq!(picture.mime, "image/jpeg");
        assert_eq!(picture.description, "Front");
        assert_eq!((picture.width, picture.height), (500, 400));
        assert_eq!((picture.depth, picture.colors), (24, 0));
        assert_eq!(picture.data, image);
        assert_eq!(picture.extension(), "jpg");
    }

    #[test]
    fn oversized_data_length_is_rejected() {
        let err = Picture::read_from_data(&encode(3, "image/png", 21 << 20, &[]), LIMIT)
            .unwrap_err();
        assert!(matches!(err, BlockError::PictureTooLarge { length, .. } if length == 21 << 20));
    }

    #[test]
    fn truncated_image_is_an_io_error() {
        let err = Picture::read_from_data(&encode(3, "image/png", 10, &[1, 2]), LIMIT)
            .unwrap_err();
        assert!(matches!(err, BlockError::Io(_)));
    }

    #[test]
    fn unknown_type_code_maps_to_other() {
        assert_eq!(PictureType::from_u32(99), PictureType::Other);
        assert_eq!(PictureType::BandLogo.to_string(), "Band logo");
    }

    #[test]
    fn extension_follows_mime() {
        let picture = Picture::read_from_data(&encode(0, "IMAGE/PNG", 0, &[]), LIMIT).unwrap();
        assert_eq!(picture.extension(), "png");
    }
}
