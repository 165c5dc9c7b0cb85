//! Binary-to-text encodings used for ciphertexts and signatures.

use base64::{
    alphabet,
    engine::{general_purpose::URL_SAFE_NO_PAD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::Deserialize;

/// Standard alphabet that writes padding but tolerates its absence on decode.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// URL-safe alphabet, unpadded on encode and padding-indifferent on decode.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Text encoding applied to raw cipher or digest output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Lowercase hexadecimal.
    Hex,
    /// RFC 4648 base64 with padding.
    Base64,
    /// RFC 4648 URL-safe base64 without padding.
    Base64Url,
    /// One character per byte (ISO-8859-1).
    #[serde(alias = "binary")]
    Latin1,
}

impl TextEncoding {
    /// Encode raw bytes into text.
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Hex => hex::encode(bytes),
            TextEncoding::Base64 => STANDARD_LENIENT.encode(bytes),
            TextEncoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Decode text back into raw bytes, or `None` if the text is malformed.
    pub fn decode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Hex => hex::decode(text).ok(),
            TextEncoding::Base64 => STANDARD_LENIENT.decode(text).ok(),
            TextEncoding::Base64Url => URL_SAFE_LENIENT.decode(text).ok(),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
        }
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(TextEncoding::Hex),
            "base64" => Ok(TextEncoding::Base64),
            "base64url" => Ok(TextEncoding::Base64Url),
            "latin1" | "binary" => Ok(TextEncoding::Latin1),
            other => Err(format!("unknown text encoding: {other}")),
        }
    }
}
