//! Transport-encoded input images.

use serde::{Deserialize, Serialize};

/// How the image payload is encoded for transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageEncoding {
    /// PNG bytes wrapped in standard base64
    #[default]
    Base64Png,
}

impl ImageEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageEncoding::Base64Png => "base64/png",
        }
    }
}

/// An image ready to be embedded in an inference request body.
///
/// Produced once per request cycle by image preparation and never mutated
/// afterwards; every fan-out submission borrows the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedImage {
    data: String,
    encoding: ImageEncoding,
    width: u32,
    height: u32,
}

impl PreparedImage {
    /// Wrap an already encoded payload.
    pub fn new(data: impl Into<String>, encoding: ImageEncoding, width: u32, height: u32) -> Self {
        Self {
            data: data.into(),
            encoding,
            width,
            height,
        }
    }

    /// The encoded payload (base64 text).
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Pixel width after orientation correction.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height after orientation correction.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of the encoded payload in bytes.
    pub fn encoded_len(&self) -> usize {
        self.data.len()
    }
}
