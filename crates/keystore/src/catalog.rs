//! Static table of supported symmetric ciphers.
//!
//! Each entry maps a conventional cipher identifier (`aes-<keybits>-<mode>`)
//! to the IV length it needs (absent for IV-less modes) and its key length.
//! The table is the single place that knows which modes carry an IV and
//! which ones are AEAD; callers ask [`CipherSpec::has_iv`] and
//! [`CipherSpec::is_aead`] instead of matching on names.

use crate::error::KeyStoreError;

/// Block-cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// Cipher block chaining with PKCS#7 padding.
    Cbc,
    /// Full-block cipher feedback.
    Cfb,
    /// 8-bit cipher feedback.
    Cfb8,
    /// Counter mode, 128-bit big-endian counter.
    Ctr,
    /// Output feedback.
    Ofb,
    /// Electronic codebook with PKCS#7 padding. No IV.
    Ecb,
    /// Galois/counter mode (AEAD).
    Gcm,
    /// Counter with CBC-MAC (AEAD).
    Ccm,
}

/// Immutable description of one catalogued cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSpec {
    /// Cipher identifier, e.g. `"aes-192-ccm"`.
    pub algorithm: &'static str,
    /// IV length in bytes, `None` for modes without an IV.
    pub iv_length: Option<usize>,
    /// Key length in bytes.
    pub key_length: usize,
    /// Mode of operation.
    pub mode: CipherMode,
}

impl CipherSpec {
    /// Returns `true` if a fresh IV is generated per encryption.
    pub fn has_iv(&self) -> bool {
        self.iv_length.is_some()
    }

    /// Returns `true` for authenticated modes, detected by the conventional
    /// `gcm`/`ccm` naming.
    pub fn is_aead(&self) -> bool {
        self.algorithm.contains("gcm") || self.algorithm.contains("ccm")
    }

    /// Returns `true` if `length` is a valid authentication tag length for
    /// this cipher. Always `false` for non-AEAD modes.
    pub fn accepts_tag_length(&self, length: usize) -> bool {
        match self.mode {
            CipherMode::Gcm => (12..=16).contains(&length),
            CipherMode::Ccm => (4..=16).contains(&length) && length % 2 == 0,
            _ => false,
        }
    }
}

const fn entry(
    algorithm: &'static str,
    iv_length: Option<usize>,
    key_length: usize,
    mode: CipherMode,
) -> CipherSpec {
    CipherSpec {
        algorithm,
        iv_length,
        key_length,
        mode,
    }
}

static CATALOG: &[CipherSpec] = &[
    entry("aes-128-cbc", Some(16), 16, CipherMode::Cbc),
    entry("aes-128-cfb", Some(16), 16, CipherMode::Cfb),
    entry("aes-128-cfb8", Some(16), 16, CipherMode::Cfb8),
    entry("aes-128-ctr", Some(16), 16, CipherMode::Ctr),
    entry("aes-128-ecb", None, 16, CipherMode::Ecb),
    entry("aes-128-ofb", Some(16), 16, CipherMode::Ofb),
    entry("aes-192-cbc", Some(16), 24, CipherMode::Cbc),
    entry("aes-192-cfb", Some(16), 24, CipherMode::Cfb),
    entry("aes-192-cfb8", Some(16), 24, CipherMode::Cfb8),
    entry("aes-192-ctr", Some(16), 24, CipherMode::Ctr),
    entry("aes-192-ecb", None, 24, CipherMode::Ecb),
    entry("aes-192-ofb", Some(16), 24, CipherMode::Ofb),
    entry("aes-256-cbc", Some(16), 32, CipherMode::Cbc),
    entry("aes-256-cfb", Some(16), 32, CipherMode::Cfb),
    entry("aes-256-cfb8", Some(16), 32, CipherMode::Cfb8),
    entry("aes-256-ctr", Some(16), 32, CipherMode::Ctr),
    entry("aes-256-ecb", None, 32, CipherMode::Ecb),
    entry("aes-256-ofb", Some(16), 32, CipherMode::Ofb),
    entry("aes-128-ccm", Some(12), 16, CipherMode::Ccm),
    entry("aes-128-gcm", Some(12), 16, CipherMode::Gcm),
    entry("aes-192-ccm", Some(12), 24, CipherMode::Ccm),
    entry("aes-192-gcm", Some(12), 24, CipherMode::Gcm),
    entry("aes-256-ccm", Some(12), 32, CipherMode::Ccm),
    entry("aes-256-gcm", Some(12), 32, CipherMode::Gcm),
    entry("id-aes128-ccm", Some(12), 16, CipherMode::Ccm),
    entry("id-aes128-gcm", Some(12), 16, CipherMode::Gcm),
    entry("id-aes192-ccm", Some(12), 24, CipherMode::Ccm),
    entry("id-aes192-gcm", Some(12), 24, CipherMode::Gcm),
    entry("id-aes256-ccm", Some(12), 32, CipherMode::Ccm),
    entry("id-aes256-gcm", Some(12), 32, CipherMode::Gcm),
];

/// Look up a cipher by identifier.
///
/// # Errors
///
/// Returns [`KeyStoreError::UnsupportedCipher`] if `algorithm` is not catalogued.
pub fn lookup(algorithm: &str) -> Result<&'static CipherSpec, KeyStoreError> {
    CATALOG
        .iter()
        .find(|spec| spec.algorithm == algorithm)
        .ok_or_else(|| KeyStoreError::UnsupportedCipher(algorithm.to_owned()))
}

/// Iterate over every catalogued cipher.
pub fn algorithms() -> impl Iterator<Item = &'static CipherSpec> {
    CATALOG.iter()
}
