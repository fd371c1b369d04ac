// FLAC APPLICATION block implementation

use serde::Serialize;

use crate::error::BlockError;
use crate::utils::serialize;

/// Vendor payload keyed by a registered 4-byte ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    #[serde(serialize_with = "serialize::ascii_id")]
    pub id: [u8; 4],
    #[serde(serialize_with = "serialize::base64")]
    pub data: Vec<u8>,
}

impl Application {
    /// Read an APPLICATION payload, truncating data beyond `max_data_length`
    pub fn read_from_data(data: &[u8], max_data_length: usize) -> Result<Self, BlockError> {
        if data.len() < 4 {
            return Err(BlockError::ApplicationTooShort(data.len()));
        }

        let mut id = [0u8; 4];
        id.copy_from_slice(&data[..4]);

        let rest = &data[4..];
        if rest.len() > max_data_length {
            tracing::debug!(
                length = rest.len(),
                limit = max_data_length,
                "Truncating application data"
            );
        }
        let kept = rest.len().min(max_data_length);

        Ok(Application {
            id,
            data: rest[..kept].to_vec(),
        })
    }

    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}
