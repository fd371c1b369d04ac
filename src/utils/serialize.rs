// serde helpers for binary and time fields

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serializer;
use std::time::Duration;

/// Lowercase hex, as used for MD5 signatures
pub fn hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&::hex::encode(bytes))
}

pub fn base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Application IDs are registered as four printable characters
pub fn ascii_id<S: Serializer>(id: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(id))
}

pub fn seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Digest {
        #[serde(serialize_with = "hex")]
        md5: [u8; 3],
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        let json = serde_json::to_string(&Digest {
            md5: [0x00, 0xAB, 0x0f],
        })
        .unwrap();
        assert_eq!(json, r#"{"md5":"00ab0f"}"#);
    }
}
