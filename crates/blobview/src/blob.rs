//! Fetched file payloads

use crate::error::ViewError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use bytes::Bytes;
use std::borrow::Cow;

/// Base64 characters decoded per slice (a multiple of 4)
const DECODE_CHUNK: usize = 512;

/// Standard alphabet that accepts missing padding and stray trailing bits
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A fetched file: raw bytes, declared MIME type and a URL to display it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Bytes,
    mime_type: String,
    access_url: String,
}

impl Blob {
    /// Blob served by a CDN, displayed straight from the CDN URL
    pub fn from_cdn(bytes: Bytes, mime_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            access_url: url.into(),
        }
    }

    /// Blob held locally, displayed through a synthesized `data:` URL
    pub fn from_bytes(bytes: Bytes, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        let access_url = data_url(&mime_type, &bytes);
        Self {
            bytes,
            mime_type,
            access_url,
        }
    }

    /// Decode a base64 API payload into a local blob
    pub fn from_base64(content: &str, mime_type: impl Into<String>) -> Result<Self, ViewError> {
        let bytes = decode_base64(content)?;
        Ok(Self::from_bytes(Bytes::from(bytes), mime_type))
    }

    /// Build a local blob from an API `content` field and its `encoding`
    pub fn from_encoded(
        content: &str,
        encoding: &str,
        mime_type: impl Into<String>,
    ) -> Result<Self, ViewError> {
        match encoding {
            "base64" => Self::from_base64(content, mime_type),
            "utf-8" => Ok(Self::from_bytes(
                Bytes::copy_from_slice(content.as_bytes()),
                mime_type,
            )),
            other => Err(ViewError::InvalidResponse(format!(
                "unsupported content encoding: {}",
                other
            ))),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// URL through which a browser can display the blob
    pub fn access_url(&self) -> &str {
        &self.access_url
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload read as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Decode base64 that may be wrapped across lines
///
/// Decoding runs slice by slice; the output is identical to a single decode.
pub fn decode_base64(content: &str) -> Result<Vec<u8>, ViewError> {
    let cleaned: Vec<u8> = content
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let mut decoded = Vec::with_capacity(cleaned.len() / 4 * 3);
    for chunk in cleaned.chunks(DECODE_CHUNK) {
        LENIENT.decode_vec(chunk, &mut decoded)?;
    }
    Ok(decoded)
}

fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
