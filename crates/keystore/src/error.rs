//! Error types for the key store.

use thiserror::Error;

use crate::signer::SigningAlgorithm;

/// Configuration errors raised by [`KeyStore`](crate::KeyStore) operations.
///
/// Authentication failures (a tag mismatch, a signature that matches no key)
/// are deliberately absent: those surface as `Ok(None)` from the operation.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// An encryption section was configured with an empty key ring.
    #[error("keys are required for encryption")]
    MissingEncryptionKeys,

    /// A signing section was configured with an empty key ring.
    #[error("keys are required for signing")]
    MissingSigningKeys,

    /// `encrypt` was called with neither an explicit key nor a ring entry.
    #[error("no key found")]
    NoKey,

    /// The cipher identifier is not present in the catalog.
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    /// `decrypt` was called while the encryption key ring is empty.
    #[error("keys required for encrypted cookies")]
    EncryptionKeysRequired,

    /// `sign` or `index_of` was called while the signing key ring is empty.
    #[error("keys required for signed cookies")]
    SigningKeysRequired,

    /// A key does not match the length demanded by the cipher.
    #[error("invalid key length for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Cipher identifier.
        algorithm: &'static str,
        /// Length required by the catalog.
        expected: usize,
        /// Length of the key that was supplied.
        actual: usize,
    },

    /// The authentication tag length is not accepted by the AEAD mode.
    #[error("unsupported auth tag length {length} for {algorithm}")]
    UnsupportedTagLength {
        /// Cipher identifier.
        algorithm: &'static str,
        /// Requested tag length in bytes.
        length: usize,
    },

    /// The HMAC could not be keyed.
    #[error("failed to initialise {0:?} signer")]
    SigningFailure(SigningAlgorithm),

    /// The underlying primitive refused to encrypt.
    #[error("cipher operation failed for {0}")]
    CipherFailure(&'static str),
}
