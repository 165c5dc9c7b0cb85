//! [`KeyStore`]: read-only key rings for encrypting and signing cookie values.
//!
//! # Ciphertext framing
//!
//! ```text
//! encode( iv? || tag? || ciphertext )
//! ```
//!
//! The IV is present when the cipher has one, the tag when the cipher is
//! AEAD. The blob does not name its algorithm; the decrypting side must be
//! configured with the same cipher and tag length.
//!
//! # Rotation
//!
//! Index 0 of each ring is the current key and is the only one used to
//! produce new material. Later entries are tried, in order, when decrypting
//! or verifying, so a new key is rolled in by prepending it.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use tracing::{debug, trace};

use crate::catalog::{self, CipherSpec};
use crate::cipher;
use crate::config::{DecryptOptions, EncryptOptions, EncryptionConfig, KeyStoreConfig, SigningConfig};
use crate::encoding::TextEncoding;
use crate::error::KeyStoreError;
use crate::signer;

/// Encryption settings after per-call overrides have been applied.
///
/// Built fresh for every call; the stored [`EncryptionConfig`] is never
/// modified.
#[derive(Debug, Clone, Copy)]
struct ResolvedEncryption<'a> {
    algorithm: &'a str,
    encoding: TextEncoding,
    auth_tag_length: usize,
}

/// Encryption and signing key rings.
///
/// A `KeyStore` is immutable once built and holds no interior mutability, so
/// one instance can be shared (typically behind an `Arc`) by every request
/// handler in the process.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    encryption: EncryptionConfig,
    signing: SigningConfig,
}

impl KeyStore {
    /// Build a key store from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::MissingEncryptionKeys`] or
    /// [`KeyStoreError::MissingSigningKeys`] if a configured section has an
    /// empty key ring.
    pub fn new(config: KeyStoreConfig) -> Result<Self, KeyStoreError> {
        if config.encryption.as_ref().is_some_and(|e| e.keys.is_empty()) {
            return Err(KeyStoreError::MissingEncryptionKeys);
        }
        if config.signing.as_ref().is_some_and(|s| s.keys.is_empty()) {
            return Err(KeyStoreError::MissingSigningKeys);
        }
        Ok(Self {
            encryption: config.encryption.unwrap_or_default(),
            signing: config.signing.unwrap_or_default(),
        })
    }

    /// Stored encryption settings.
    pub fn encryption(&self) -> &EncryptionConfig {
        &self.encryption
    }

    /// Stored signing settings.
    pub fn signing(&self) -> &SigningConfig {
        &self.signing
    }

    /// Returns `true` if at least one encryption key is configured.
    pub fn has_encryption_keys(&self) -> bool {
        !self.encryption.keys.is_empty()
    }

    /// Returns `true` if at least one signing key is configured.
    pub fn has_signing_keys(&self) -> bool {
        !self.signing.keys.is_empty()
    }

    fn resolve<'a>(
        &'a self,
        algorithm: Option<&'a str>,
        encoding: Option<TextEncoding>,
        auth_tag_length: Option<usize>,
    ) -> ResolvedEncryption<'a> {
        ResolvedEncryption {
            algorithm: algorithm.unwrap_or(&self.encryption.algorithm),
            encoding: encoding.unwrap_or(self.encryption.encoding),
            auth_tag_length: auth_tag_length.unwrap_or(self.encryption.auth_tag_length),
        }
    }

    // -----------------------------------------------------------------------
    // Encryption
    // -----------------------------------------------------------------------

    /// Encrypt `data` with the current key and stored settings.
    ///
    /// Returns `Ok(None)` for empty input.
    ///
    /// # Errors
    ///
    /// See [`KeyStore::encrypt_with`].
    pub fn encrypt(&self, data: impl AsRef<[u8]>) -> Result<Option<String>, KeyStoreError> {
        self.encrypt_with(data, &EncryptOptions::default())
    }

    /// Encrypt `data`, overriding stored settings field by field.
    ///
    /// A fresh random IV is drawn from the OS CSPRNG for every call.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::NoKey`] if there is neither an explicit key
    /// nor a ring entry, [`KeyStoreError::UnsupportedCipher`] for an unknown
    /// algorithm, and the key-length and tag-length errors of the cipher layer.
    pub fn encrypt_with(
        &self,
        data: impl AsRef<[u8]>,
        options: &EncryptOptions<'_>,
    ) -> Result<Option<String>, KeyStoreError> {
        let data = data.as_ref();
        if data.is_empty() {
            return Ok(None);
        }
        let resolved = self.resolve(options.algorithm, options.encoding, options.auth_tag_length);
        let key = options
            .key
            .or_else(|| self.encryption.keys.first().map(|k| k.as_bytes()))
            .filter(|k| !k.is_empty())
            .ok_or(KeyStoreError::NoKey)?;
        let spec = catalog::lookup(resolved.algorithm)?;

        let mut iv = vec![0u8; spec.iv_length.unwrap_or(0)];
        OsRng.fill_bytes(&mut iv);

        seal_framed(spec, key, &iv, &resolved, data).map(Some)
    }

    // -----------------------------------------------------------------------
    // Decryption
    // -----------------------------------------------------------------------

    /// Decrypt `data` with the stored ring and settings.
    ///
    /// # Errors
    ///
    /// See [`KeyStore::decrypt_with`].
    pub fn decrypt(&self, data: &str) -> Result<Option<String>, KeyStoreError> {
        self.decrypt_with(data, &DecryptOptions::default())
    }

    /// Decrypt `data`, trying each candidate key in ring order.
    ///
    /// The first key that authenticates (or, for unauthenticated modes,
    /// unpads) wins. Returns `Ok(None)` for empty input, undecodable text,
    /// truncated framing, or when no candidate succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::EncryptionKeysRequired`] when there are no
    /// candidate keys, [`KeyStoreError::UnsupportedCipher`] for an unknown
    /// algorithm, [`KeyStoreError::UnsupportedTagLength`] for an AEAD tag
    /// length the mode cannot use, and [`KeyStoreError::InvalidKeyLength`] if
    /// a ring key does not fit the cipher.
    pub fn decrypt_with(
        &self,
        data: &str,
        options: &DecryptOptions<'_>,
    ) -> Result<Option<String>, KeyStoreError> {
        if data.is_empty() {
            return Ok(None);
        }
        let resolved = self.resolve(options.algorithm, options.encoding, options.auth_tag_length);
        let candidates: Vec<&[u8]> = match options.key {
            Some(key) => vec![key],
            None => self.encryption.keys.iter().map(|k| k.as_bytes()).collect(),
        };
        if candidates.is_empty() {
            return Err(KeyStoreError::EncryptionKeysRequired);
        }
        let spec = catalog::lookup(resolved.algorithm)?;
        if spec.is_aead() && !spec.accepts_tag_length(resolved.auth_tag_length) {
            return Err(KeyStoreError::UnsupportedTagLength {
                algorithm: spec.algorithm,
                length: resolved.auth_tag_length,
            });
        }

        let Some(raw) = resolved.encoding.decode(data) else {
            trace!(algorithm = spec.algorithm, "ciphertext is not valid for its encoding");
            return Ok(None);
        };
        let mut rest = raw.as_slice();

        let iv = match spec.iv_length {
            Some(len) => {
                let Some((head, tail)) = split(rest, len) else {
                    return Ok(None);
                };
                rest = tail;
                Some(options.iv.unwrap_or(head))
            }
            None => options.iv,
        };

        let tag = if spec.is_aead() {
            let Some((head, tail)) = split(rest, resolved.auth_tag_length) else {
                return Ok(None);
            };
            rest = tail;
            Some(options.auth_tag.unwrap_or(head))
        } else {
            None
        };

        for (index, key) in candidates.iter().enumerate() {
            if let Some(plaintext) = cipher::open(spec, key, iv, tag, rest)? {
                if index > 0 {
                    debug!(index, algorithm = spec.algorithm, "decrypted with a retired key");
                }
                return Ok(Some(String::from_utf8_lossy(&plaintext).into_owned()));
            }
        }

        trace!(
            algorithm = spec.algorithm,
            candidates = candidates.len(),
            "no key decrypted the value"
        );
        Ok(None)
    }

    // -----------------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------------

    /// Sign `data` with the current signing key.
    ///
    /// Returns `Ok(None)` for empty input.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::SigningKeysRequired`] if the ring is empty.
    pub fn sign(&self, data: &str) -> Result<Option<String>, KeyStoreError> {
        if data.is_empty() {
            return Ok(None);
        }
        let key = self
            .signing
            .keys
            .first()
            .ok_or(KeyStoreError::SigningKeysRequired)?;
        self.sign_with_key(data, key.as_bytes())
    }

    /// Sign `data` with an explicit key, using the stored algorithm and encoding.
    ///
    /// Returns `Ok(None)` for empty input.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::SigningFailure`] if the HMAC rejects the key.
    pub fn sign_with_key(
        &self,
        data: &str,
        key: &[u8],
    ) -> Result<Option<String>, KeyStoreError> {
        if data.is_empty() {
            return Ok(None);
        }
        signer::signature(
            self.signing.algorithm,
            self.signing.encoding,
            key,
            data.as_bytes(),
        )
        .map(Some)
    }

    /// Ring index of the first key whose signature of `data` equals `digest`.
    ///
    /// Comparisons are constant-time. `Ok(Some(0))` means the current key
    /// signed the data; a higher index means a retired key did.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::SigningKeysRequired`] if the ring is empty.
    pub fn index_of(&self, data: &str, digest: &str) -> Result<Option<usize>, KeyStoreError> {
        if self.signing.keys.is_empty() {
            return Err(KeyStoreError::SigningKeysRequired);
        }
        for (index, key) in self.signing.keys.iter().enumerate() {
            let expected = self.sign_with_key(data, key.as_bytes())?;
            if expected.is_some_and(|expected| signer::signatures_match(&expected, digest)) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Returns `true` if any ring key signed `data` as `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::SigningKeysRequired`] if the ring is empty.
    pub fn verify(&self, data: &str, digest: &str) -> Result<bool, KeyStoreError> {
        Ok(self.index_of(data, digest)?.is_some())
    }
}

/// Encrypt under a caller-chosen IV and frame the result.
fn seal_framed(
    spec: &CipherSpec,
    key: &[u8],
    iv: &[u8],
    resolved: &ResolvedEncryption<'_>,
    data: &[u8],
) -> Result<String, KeyStoreError> {
    let sealed = cipher::seal(spec, key, iv, resolved.auth_tag_length, data)?;
    let tag = sealed.tag.unwrap_or_default();

    let mut framed = Vec::with_capacity(iv.len() + tag.len() + sealed.ciphertext.len());
    framed.extend_from_slice(iv);
    framed.extend_from_slice(&tag);
    framed.extend_from_slice(&sealed.ciphertext);
    Ok(resolved.encoding.encode(&framed))
}

fn split(bytes: &[u8], at: usize) -> Option<(&[u8], &[u8])> {
    (bytes.len() >= at).then(|| bytes.split_at(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncryptionConfig, SigningConfig};
    use crate::signer::SigningAlgorithm;

    const KEY_24: &str = "secretsecretsecretsecret";
    const KEY_32: &str = "32secretsecretsecretsecretsecret";
    const CCM_VECTOR: &str =
        "313233343132333431323334d0658e97af34ad7906a0724657faee5c062a9b5842925dc0";
    const DATA: &str = "Keyboard Cat has a hat.";

    fn encrypting(config: EncryptionConfig) -> KeyStore {
        KeyStore::new(KeyStoreConfig {
            encryption: Some(config),
            signing: None,
        })
        .unwrap()
    }

    fn signing(keys: &[&str]) -> KeyStore {
        KeyStore::new(KeyStoreConfig {
            encryption: None,
            signing: Some(SigningConfig::new(keys.iter().copied())),
        })
        .unwrap()
    }

    fn sealed_with_iv(ks: &KeyStore, iv: &[u8], data: &str, options: &EncryptOptions<'_>) -> String {
        let resolved = ks.resolve(options.algorithm, options.encoding, options.auth_tag_length);
        let spec = catalog::lookup(resolved.algorithm).unwrap();
        let key = options.key.unwrap_or(ks.encryption.keys[0].as_bytes());
        seal_framed(spec, key, iv, &resolved, data.as_bytes()).unwrap()
    }

    // --- construction -------------------------------------------------------

    #[test]
    fn accepts_empty_config() {
        let ks = KeyStore::new(KeyStoreConfig::default()).unwrap();
        assert!(!ks.has_encryption_keys());
        assert!(!ks.has_signing_keys());
        assert_eq!(ks.encryption().algorithm, "aes-192-ccm");
    }

    #[test]
    fn rejects_empty_encryption_ring() {
        let err = KeyStore::new(KeyStoreConfig {
            encryption: Some(EncryptionConfig::default()),
            signing: None,
        })
        .unwrap_err();
        assert!(matches!(err, KeyStoreError::MissingEncryptionKeys));
    }

    #[test]
    fn rejects_empty_signing_ring() {
        let err = KeyStore::new(KeyStoreConfig {
            encryption: None,
            signing: Some(SigningConfig::default()),
        })
        .unwrap_err();
        assert!(matches!(err, KeyStoreError::MissingSigningKeys));
    }

    #[test]
    fn keeps_only_provided_overrides() {
        let ks = KeyStore::new(KeyStoreConfig {
            encryption: Some(EncryptionConfig::new([KEY_24]).with_encoding(TextEncoding::Latin1)),
            signing: Some(SigningConfig::new(["k"]).with_algorithm(SigningAlgorithm::Sha512)),
        })
        .unwrap();
        assert_eq!(ks.encryption().encoding, TextEncoding::Latin1);
        assert_eq!(ks.encryption().algorithm, "aes-192-ccm");
        assert_eq!(ks.signing().algorithm, SigningAlgorithm::Sha512);
        assert_eq!(ks.signing().encoding, TextEncoding::Base64);
    }

    // --- encrypt ------------------------------------------------------------

    #[test]
    fn ccm_framing_matches_vector() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        let out = sealed_with_iv(&ks, b"123412341234", "ohmytext", &EncryptOptions::default());
        assert_eq!(out, CCM_VECTOR);
    }

    #[test]
    fn explicit_key_override() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]).with_algorithm("aes-192-cbc"));
        let options = EncryptOptions {
            key: Some(b"necretnecretnecretnecret"),
            ..EncryptOptions::default()
        };
        let out = sealed_with_iv(&ks, b"1234123412341234", "ohmytext", &options);
        assert_eq!(
            out,
            "3132333431323334313233343132333459c8afb0dac2e2ad875c39ce614ad418"
        );
    }

    #[test]
    fn base64_output() {
        let ks = encrypting(
            EncryptionConfig::new([KEY_32])
                .with_algorithm("aes-256-cbc")
                .with_encoding(TextEncoding::Base64),
        );
        let out = sealed_with_iv(&ks, b"1234123412341234", "ohmytext", &EncryptOptions::default());
        assert_eq!(out, "MTIzNDEyMzQxMjM0MTIzNOYHxZR3iT5J166DoLYrYQc=");
    }

    #[test]
    fn per_call_options_do_not_touch_stored_config() {
        let ks = encrypting(EncryptionConfig::new([KEY_32]).with_algorithm("aes-192-cbc"));
        let options = EncryptOptions {
            algorithm: Some("aes-256-cbc"),
            encoding: Some(TextEncoding::Base64),
            ..EncryptOptions::default()
        };
        let out = sealed_with_iv(&ks, b"1234123412341234", "ohmytext", &options);
        assert_eq!(out, "MTIzNDEyMzQxMjM0MTIzNOYHxZR3iT5J166DoLYrYQc=");
        assert_eq!(ks.encryption().algorithm, "aes-192-cbc");
        assert_eq!(ks.encryption().encoding, TextEncoding::Hex);
    }

    #[test]
    fn ecb_has_no_iv_prefix() {
        let ks = encrypting(
            EncryptionConfig::new([KEY_32])
                .with_algorithm("aes-256-ecb")
                .with_encoding(TextEncoding::Base64),
        );
        assert_eq!(
            ks.encrypt("ohmytext").unwrap().as_deref(),
            Some("43ZmN7YJ/wWv5ivQW8M6Uw==")
        );
    }

    #[test]
    fn encrypt_empty_is_none() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        assert_eq!(ks.encrypt("").unwrap(), None);
    }

    #[test]
    fn encrypt_without_key_fails() {
        let ks = KeyStore::default();
        assert!(matches!(ks.encrypt("ohmytext"), Err(KeyStoreError::NoKey)));
    }

    #[test]
    fn encrypt_unsupported_cipher_fails() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        let options = EncryptOptions {
            algorithm: Some("some-algorithm-unsupported"),
            ..EncryptOptions::default()
        };
        assert!(matches!(
            ks.encrypt_with("ohmytext", &options),
            Err(KeyStoreError::UnsupportedCipher(_))
        ));
    }

    #[test]
    fn random_ivs_differ() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        assert_ne!(ks.encrypt("same").unwrap(), ks.encrypt("same").unwrap());
    }

    // --- decrypt ------------------------------------------------------------

    #[test]
    fn decrypt_round_trip() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]).with_encoding(TextEncoding::Base64));
        let encrypted = ks.encrypt("ohmytext").unwrap().unwrap();
        assert_eq!(ks.decrypt(&encrypted).unwrap().as_deref(), Some("ohmytext"));
    }

    #[test]
    fn decrypt_known_cookie_value() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]).with_encoding(TextEncoding::Base64));
        assert_eq!(
            ks.decrypt("xOxYwbV72DCmmzMaSe1XuTDG79GqxDPRaBjXh8bF5jDvoVoF")
                .unwrap()
                .as_deref(),
            Some("ohmytext")
        );
    }

    #[test]
    fn decrypt_falls_back_to_retired_key() {
        let ks = encrypting(
            EncryptionConfig::new(["newsecsecretsecretsecret", KEY_24])
                .with_encoding(TextEncoding::Base64),
        );
        assert_eq!(
            ks.decrypt("xOxYwbV72DCmmzMaSe1XuTDG79GqxDPRaBjXh8bF5jDvoVoF")
                .unwrap()
                .as_deref(),
            Some("ohmytext")
        );
    }

    #[test]
    fn decrypt_with_wrong_tag_is_none() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]).with_encoding(TextEncoding::Base64));
        let encrypted = ks.encrypt("ohmytext").unwrap().unwrap();
        let options = DecryptOptions {
            auth_tag: Some(b"1234567812345678"),
            ..DecryptOptions::default()
        };
        assert_eq!(ks.decrypt_with(&encrypted, &options).unwrap(), None);
    }

    #[test]
    fn decrypt_accepts_explicit_iv_and_tag() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        let with_iv = DecryptOptions {
            iv: Some(b"123412341234"),
            ..DecryptOptions::default()
        };
        assert_eq!(
            ks.decrypt_with(CCM_VECTOR, &with_iv).unwrap().as_deref(),
            Some("ohmytext")
        );

        let tag = hex::decode("d0658e97af34ad7906a0724657faee5c").unwrap();
        let with_tag = DecryptOptions {
            auth_tag: Some(&tag),
            ..DecryptOptions::default()
        };
        assert_eq!(
            ks.decrypt_with(CCM_VECTOR, &with_tag).unwrap().as_deref(),
            Some("ohmytext")
        );
    }

    #[test]
    fn decrypt_empty_is_none() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        assert_eq!(ks.decrypt("").unwrap(), None);
    }

    #[test]
    fn decrypt_without_keys_fails() {
        let ks = KeyStore::default();
        assert!(matches!(
            ks.decrypt("ohmytext"),
            Err(KeyStoreError::EncryptionKeysRequired)
        ));
    }

    #[test]
    fn decrypt_unsupported_cipher_fails() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        let options = DecryptOptions {
            algorithm: Some("some-algorithm-unsupported"),
            ..DecryptOptions::default()
        };
        assert!(matches!(
            ks.decrypt_with("doesnotmatter", &options),
            Err(KeyStoreError::UnsupportedCipher(_))
        ));
    }

    #[test]
    fn decrypt_garbage_is_none() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        assert_eq!(ks.decrypt("not hex at all").unwrap(), None);
        assert_eq!(ks.decrypt("abcd").unwrap(), None);
    }

    #[test]
    fn decrypt_unauthenticated_garbage_is_none() {
        let ks = encrypting(
            EncryptionConfig::new([KEY_32])
                .with_algorithm("aes-256-cbc")
                .with_encoding(TextEncoding::Base64),
        );
        assert_eq!(
            ks.decrypt("MTIzNDEyMzQxMjM0MTIzNA").unwrap(),
            None,
            "IV with no ciphertext block cannot unpad"
        );
    }

    #[test]
    fn short_auth_tag_round_trip() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]).with_auth_tag_length(10));
        let encrypted = ks.encrypt("ohmytext").unwrap().unwrap();
        assert_eq!(ks.decrypt(&encrypted).unwrap().as_deref(), Some("ohmytext"));
    }

    // --- signing ------------------------------------------------------------

    #[test]
    fn index_of_reports_signing_key() {
        let ks = signing(&["SEKRIT2", "SEKRIT1"]);
        assert_eq!(ks.index_of(DATA, "_jl9qXYgk5AgBiKFOPYK073FMEQ").unwrap(), Some(0));
        assert_eq!(ks.index_of(DATA, "34Sr3OIsheUYWKL5_w--zJsdSNk").unwrap(), Some(1));
        assert_eq!(ks.index_of(DATA, "xmM8HQl2eBtPP9nmZ7BK_wpqoxQ").unwrap(), None);
    }

    #[test]
    fn index_of_never_matches_an_empty_digest() {
        let ks = signing(&["SEKRIT2", "SEKRIT1"]);
        assert_eq!(ks.index_of(DATA, "").unwrap(), None);
        assert_eq!(ks.index_of("", "").unwrap(), None);
    }

    #[test]
    fn index_of_without_keys_fails() {
        let ks = encrypting(EncryptionConfig::new([KEY_24]));
        assert!(matches!(
            ks.index_of("ohmytext", "ohmytext"),
            Err(KeyStoreError::SigningKeysRequired)
        ));
    }

    #[test]
    fn sign_uses_first_key() {
        let ks = signing(&["SEKRIT2", "SEKRIT1"]);
        assert_eq!(ks.sign(DATA).unwrap().as_deref(), Some("_jl9qXYgk5AgBiKFOPYK073FMEQ"));
    }

    #[test]
    fn sign_cookie_pair() {
        let ks = signing(&["keyboard cat"]);
        assert_eq!(ks.sign("foo=bar").unwrap().as_deref(), Some("iW2fuCIzk9Cg_rqLT1CAqrtdWs8"));
    }

    #[test]
    fn sign_empty_is_none() {
        let ks = signing(&["SEKRIT1"]);
        assert_eq!(ks.sign("").unwrap(), None);
    }

    #[test]
    fn sign_without_keys_fails() {
        assert!(matches!(
            KeyStore::default().sign("foo=bar"),
            Err(KeyStoreError::SigningKeysRequired)
        ));
    }

    #[test]
    fn verify_against_any_key() {
        let ks = signing(&["SEKRIT2", "SEKRIT1"]);
        assert!(ks.verify(DATA, "_jl9qXYgk5AgBiKFOPYK073FMEQ").unwrap());
        assert!(ks.verify(DATA, "34Sr3OIsheUYWKL5_w--zJsdSNk").unwrap());
        assert!(!ks.verify(DATA, "bogus data").unwrap());
    }

    #[test]
    fn verify_with_algorithm_and_encoding() {
        let sha256 = KeyStore::new(KeyStoreConfig {
            encryption: None,
            signing: Some(SigningConfig::new(["SEKRIT1"]).with_algorithm(SigningAlgorithm::Sha256)),
        })
        .unwrap();
        assert!(sha256
            .verify(DATA, "pu97aPRZRLKi3-eANtIlTG_CwSc39mAcIZ1c6FxsGCk")
            .unwrap());

        let hex = KeyStore::new(KeyStoreConfig {
            encryption: None,
            signing: Some(SigningConfig::new(["SEKRIT1"]).with_encoding(TextEncoding::Hex)),
        })
        .unwrap();
        assert_eq!(
            hex.index_of(DATA, "df84abdce22c85e51858a2f9ff0fbecc9b1d48d9").unwrap(),
            Some(0)
        );
    }
}
