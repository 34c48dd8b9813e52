use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::STANDARD};
use regex::Regex;

use crate::error::ValidationError;

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/([A-Za-z0-9.+-]+);base64,").expect("data uri pattern is valid")
});

/// Decoded image for one request. Dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    /// Accepts plain base64 or a `data:image/<subtype>;base64,` URI.
    pub fn from_base64(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingImage);
        }

        let (mime_type, encoded) = match DATA_URI.captures(raw) {
            Some(captures) => {
                let prefix_len = captures.get(0).map_or(0, |m| m.end());
                let subtype = captures.get(1).map_or("jpeg", |m| m.as_str());

                (format!("image/{}", subtype.to_lowercase()), &raw[prefix_len..])
            }
            None => (DEFAULT_MIME_TYPE.to_string(), raw),
        };

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| ValidationError::MalformedImage)?;

        if bytes.is_empty() {
            return Err(ValidationError::MissingImage);
        }

        Ok(Self { mime_type, bytes })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_strips_data_uri() {
        let payload = ImagePayload::from_base64(&format!("data:image/png;base64,{PNG_1X1}")).unwrap();

        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(&payload.bytes[1..4], b"PNG");
        assert_eq!(payload.to_base64(), PNG_1X1);
    }

    #[test]
    fn test_plain_base64_defaults_to_jpeg() {
        let payload = ImagePayload::from_base64(PNG_1X1).unwrap();

        assert_eq!(payload.mime_type, DEFAULT_MIME_TYPE);
        assert_eq!(&payload.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_other_subtypes() {
        let payload = ImagePayload::from_base64(&format!("data:image/WEBP;base64,{PNG_1X1}")).unwrap();
        assert_eq!(payload.mime_type, "image/webp");
    }

    #[test]
    fn test_empty() {
        assert_eq!(ImagePayload::from_base64("  "), Err(ValidationError::MissingImage));
        assert_eq!(
            ImagePayload::from_base64("data:image/png;base64,"),
            Err(ValidationError::MissingImage)
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            ImagePayload::from_base64("not base64 at all!"),
            Err(ValidationError::MalformedImage)
        );
        assert_eq!(
            ImagePayload::from_base64("data:text/plain;base64,aGVsbG8="),
            Err(ValidationError::MalformedImage)
        );
    }
}
