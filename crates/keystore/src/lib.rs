//! Key rings for cookie protection.
//!
//! A [`KeyStore`] holds an ordered encryption ring and an ordered signing
//! ring. The first key of each ring produces new ciphertexts and signatures;
//! the rest are accepted when decrypting and verifying so keys can rotate
//! without invalidating cookies already in the wild.

pub mod catalog;
mod cipher;
pub mod config;
pub mod encoding;
pub mod error;
pub mod secret;
mod signer;
pub mod store;

pub use catalog::{lookup, CipherMode, CipherSpec};
pub use config::{DecryptOptions, EncryptOptions, EncryptionConfig, KeyStoreConfig, SigningConfig};
pub use encoding::TextEncoding;
pub use error::KeyStoreError;
pub use secret::SecretKey;
pub use signer::SigningAlgorithm;
pub use store::KeyStore;
