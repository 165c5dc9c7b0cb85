//! Key-ring configuration and per-call option overrides.
//!
//! The configuration structs deserialise with the same defaults a
//! hand-built value gets, so a key store can be described in a config file or
//! environment variables with only the key lists present.

use serde::Deserialize;

use crate::encoding::TextEncoding;
use crate::secret::SecretKey;
use crate::signer::SigningAlgorithm;

/// Encryption key ring and cipher settings. `keys[0]` is the current key.
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionConfig {
    /// Ordered key ring. Later entries only decrypt older cookies.
    #[serde(default)]
    pub keys: Vec<SecretKey>,

    /// Cipher identifier, looked up in the catalog at use time.
    #[serde(default = "default_cipher")]
    pub algorithm: String,

    /// Encoding of the framed ciphertext.
    #[serde(default = "default_encryption_encoding")]
    pub encoding: TextEncoding,

    /// Authentication tag length for AEAD ciphers, in bytes.
    #[serde(default = "default_auth_tag_length")]
    pub auth_tag_length: usize,
}

/// Signing key ring and HMAC settings. `keys[0]` is the current key.
#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    /// Ordered key ring. Later entries only verify older signatures.
    #[serde(default)]
    pub keys: Vec<SecretKey>,

    /// Hash function for the HMAC.
    #[serde(default = "default_signing_algorithm")]
    pub algorithm: SigningAlgorithm,

    /// Encoding of the digest before URL-safe substitution.
    #[serde(default = "default_signing_encoding")]
    pub encoding: TextEncoding,
}

/// Construction input for [`KeyStore`](crate::KeyStore).
///
/// Either section may be omitted; a present section must carry at least one key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyStoreConfig {
    /// Encryption settings, if encrypted cookies are used.
    #[serde(default)]
    pub encryption: Option<EncryptionConfig>,

    /// Signing settings, if signed cookies are used.
    #[serde(default)]
    pub signing: Option<SigningConfig>,
}

fn default_cipher() -> String {
    "aes-192-ccm".into()
}
fn default_encryption_encoding() -> TextEncoding {
    TextEncoding::Hex
}
fn default_auth_tag_length() -> usize {
    16
}
fn default_signing_algorithm() -> SigningAlgorithm {
    SigningAlgorithm::Sha1
}
fn default_signing_encoding() -> TextEncoding {
    TextEncoding::Base64
}

impl EncryptionConfig {
    /// Default settings around the given key ring.
    pub fn new<K: Into<SecretKey>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace the cipher identifier.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Replace the ciphertext encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Replace the AEAD tag length.
    pub fn with_auth_tag_length(mut self, length: usize) -> Self {
        self.auth_tag_length = length;
        self
    }
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            algorithm: default_cipher(),
            encoding: default_encryption_encoding(),
            auth_tag_length: default_auth_tag_length(),
        }
    }
}

impl SigningConfig {
    /// Default settings around the given key ring.
    pub fn new<K: Into<SecretKey>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace the hash function.
    pub fn with_algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Replace the digest encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            algorithm: default_signing_algorithm(),
            encoding: default_signing_encoding(),
        }
    }
}

/// Per-call overrides for [`KeyStore::encrypt_with`](crate::KeyStore::encrypt_with).
///
/// Unset fields fall back to the stored [`EncryptionConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptOptions<'a> {
    /// Encrypt with this key instead of the current ring key.
    pub key: Option<&'a [u8]>,
    /// Cipher identifier override.
    pub algorithm: Option<&'a str>,
    /// Output encoding override.
    pub encoding: Option<TextEncoding>,
    /// AEAD tag length override.
    pub auth_tag_length: Option<usize>,
}

/// Per-call overrides for [`KeyStore::decrypt_with`](crate::KeyStore::decrypt_with).
///
/// Unset fields fall back to the stored [`EncryptionConfig`]. An explicit
/// `iv` or `auth_tag` replaces the value otherwise read from the front of
/// the ciphertext; the bytes are still skipped in the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecryptOptions<'a> {
    /// Try only this key instead of the whole ring.
    pub key: Option<&'a [u8]>,
    /// Cipher identifier override.
    pub algorithm: Option<&'a str>,
    /// Input encoding override.
    pub encoding: Option<TextEncoding>,
    /// AEAD tag length override.
    pub auth_tag_length: Option<usize>,
    /// Explicit IV.
    pub iv: Option<&'a [u8]>,
    /// Explicit authentication tag.
    pub auth_tag: Option<&'a [u8]>,
}
