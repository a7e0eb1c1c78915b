//! Embedded photo attachments.
//!
//! Photos are stored inside the durable record as data URLs
//! (`data:<mime>;base64,<payload>`), so an entry is self-contained. Payloads
//! are pre-downscaled by the capturing client before they reach the store.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A photo attached to a meal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("not a data URL (expected 'data:' prefix)")]
    NotADataUrl,
    #[error("data URL has no ',' separating header from payload")]
    MissingPayload,
    #[error("unsupported data URL encoding '{0}' (only base64 is supported)")]
    UnsupportedEncoding(String),
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl EntryImage {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` string.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url.strip_prefix("data:").ok_or(ImageError::NotADataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageError::MissingPayload)?;
        let mime = match header.strip_suffix(";base64") {
            Some(mime) => mime,
            None => return Err(ImageError::UnsupportedEncoding(header.to_string())),
        };
        let bytes = BASE64.decode(payload)?;
        Ok(Self::new(mime, bytes))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

impl Serialize for EntryImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for EntryImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        EntryImage::from_data_url(&url).map_err(D::Error::custom)
    }
}
