//! Keyed-hash signatures for cookie values.
//!
//! Signatures are an HMAC digest rendered in the configured text encoding and
//! then made URL-safe: `+` becomes `-`, `/` becomes `_`, and `=` padding is
//! dropped.

use hmac::digest::{InvalidLength, KeyInit};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::encoding::TextEncoding;
use crate::error::KeyStoreError;

/// Hash function underlying the HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningAlgorithm {
    /// HMAC-SHA1.
    Sha1,
    /// HMAC-SHA224.
    Sha224,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA384.
    Sha384,
    /// HMAC-SHA512.
    Sha512,
}

impl std::str::FromStr for SigningAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(SigningAlgorithm::Sha1),
            "sha224" => Ok(SigningAlgorithm::Sha224),
            "sha256" => Ok(SigningAlgorithm::Sha256),
            "sha384" => Ok(SigningAlgorithm::Sha384),
            "sha512" => Ok(SigningAlgorithm::Sha512),
            other => Err(format!("unsupported signing algorithm: {other}")),
        }
    }
}

fn mac<M: Mac + KeyInit>(
    algorithm: SigningAlgorithm,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, KeyStoreError> {
    finish(<M as KeyInit>::new_from_slice(key), algorithm, data)
}

fn finish<M: Mac>(
    keyed: Result<M, InvalidLength>,
    algorithm: SigningAlgorithm,
    data: &[u8],
) -> Result<Vec<u8>, KeyStoreError> {
    let mut m = keyed.map_err(|_| KeyStoreError::SigningFailure(algorithm))?;
    m.update(data);
    Ok(m.finalize().into_bytes().to_vec())
}

/// Raw HMAC digest of `data` under `key`.
///
/// # Errors
///
/// Returns [`KeyStoreError::SigningFailure`] if the HMAC rejects the key.
pub(crate) fn digest(
    algorithm: SigningAlgorithm,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, KeyStoreError> {
    match algorithm {
        SigningAlgorithm::Sha1 => mac::<Hmac<Sha1>>(algorithm, key, data),
        SigningAlgorithm::Sha224 => mac::<Hmac<Sha224>>(algorithm, key, data),
        SigningAlgorithm::Sha256 => mac::<Hmac<Sha256>>(algorithm, key, data),
        SigningAlgorithm::Sha384 => mac::<Hmac<Sha384>>(algorithm, key, data),
        SigningAlgorithm::Sha512 => mac::<Hmac<Sha512>>(algorithm, key, data),
    }
}

/// Signature text for `data`: encoded digest with URL-unsafe characters
/// replaced and padding removed.
pub(crate) fn signature(
    algorithm: SigningAlgorithm,
    encoding: TextEncoding,
    key: &[u8],
    data: &[u8],
) -> Result<String, KeyStoreError> {
    Ok(encoding
        .encode(&digest(algorithm, key, data)?)
        .chars()
        .filter_map(|c| match c {
            '+' => Some('-'),
            '/' => Some('_'),
            '=' => None,
            other => Some(other),
        })
        .collect())
}

/// Constant-time equality over two signature strings.
pub(crate) fn signatures_match(expected: &str, candidate: &str) -> bool {
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}
