//! Object key decoding.
//!
//! S3 event notifications carry keys in `application/x-www-form-urlencoded`
//! form: a space arrives as `+` (or `%20`) and other reserved characters as
//! `%XX` escapes.

use crate::traits::{StorageError, StorageResult};

/// Decode a key taken from an event notification into the real object key.
pub fn decode_object_key(raw: &str) -> StorageResult<String> {
    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|key| key.into_owned())
        .map_err(|e| StorageError::InvalidKey(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_percent_encoded_space() {
        assert_eq!(decode_object_key("my%20photo.jpg").unwrap(), "my photo.jpg");
    }

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(decode_object_key("my+photo.jpg").unwrap(), "my photo.jpg");
    }

    #[test]
    fn test_encoded_plus_stays_plus() {
        assert_eq!(decode_object_key("a%2Bb.png").unwrap(), "a+b.png");
    }

    #[test]
    fn test_plain_key_unchanged() {
        assert_eq!(
            decode_object_key("uploads/2024/cat.png").unwrap(),
            "uploads/2024/cat.png"
        );
    }

    #[test]
    fn test_utf8_escapes() {
        assert_eq!(decode_object_key("caf%C3%A9.jpg").unwrap(), "café.jpg");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(matches!(
            decode_object_key("bad%FF.jpg"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
