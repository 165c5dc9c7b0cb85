//! Symmetric encrypt/decrypt primitives for every catalogued cipher.
//!
//! This layer knows nothing about key rings, text encodings or framing. It
//! takes one key, one IV and (for AEAD modes) one tag, and dispatches to the
//! matching RustCrypto implementation. Framing lives in [`crate::store`].
//!
//! AEAD modes run with empty associated data; the tag is returned detached so
//! the caller can place it ahead of the ciphertext.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::{
    consts::{U10, U12, U13, U14, U15, U16, U4, U6, U8},
    generic_array::GenericArray,
    AeadInPlace,
};
use aes_gcm::AesGcm;
use cbc::cipher::{
    block_padding::Pkcs7, AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
    StreamCipher,
};
use ccm::Ccm;

use crate::catalog::{CipherMode, CipherSpec};
use crate::error::KeyStoreError;

/// Output of [`seal`]: detached tag (AEAD only) and ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sealed {
    pub(crate) tag: Option<Vec<u8>>,
    pub(crate) ciphertext: Vec<u8>,
}

impl Sealed {
    fn unauthenticated(ciphertext: Vec<u8>) -> Self {
        Self {
            tag: None,
            ciphertext,
        }
    }
}

/// Bind `$aes` to the AES variant matching a catalogued key length.
macro_rules! with_aes {
    ($key_length:expr, |$aes:ident| $body:expr) => {
        match $key_length {
            16 => {
                type $aes = Aes128;
                $body
            }
            24 => {
                type $aes = Aes192;
                $body
            }
            _ => {
                type $aes = Aes256;
                $body
            }
        }
    };
}

/// Bind `$tag` to the typenum for a GCM tag length, or evaluate `$fallback`.
macro_rules! with_gcm_tag {
    ($length:expr, |$tag:ident| $body:expr, else $fallback:expr) => {
        match $length {
            12 => {
                type $tag = U12;
                $body
            }
            13 => {
                type $tag = U13;
                $body
            }
            14 => {
                type $tag = U14;
                $body
            }
            15 => {
                type $tag = U15;
                $body
            }
            16 => {
                type $tag = U16;
                $body
            }
            _ => $fallback,
        }
    };
}

/// Bind `$tag` to the typenum for a CCM tag length, or evaluate `$fallback`.
macro_rules! with_ccm_tag {
    ($length:expr, |$tag:ident| $body:expr, else $fallback:expr) => {
        match $length {
            4 => {
                type $tag = U4;
                $body
            }
            6 => {
                type $tag = U6;
                $body
            }
            8 => {
                type $tag = U8;
                $body
            }
            10 => {
                type $tag = U10;
                $body
            }
            12 => {
                type $tag = U12;
                $body
            }
            14 => {
                type $tag = U14;
                $body
            }
            16 => {
                type $tag = U16;
                $body
            }
            _ => $fallback,
        }
    };
}

/// AEAD nonce length shared by every catalogued GCM/CCM entry.
const AEAD_NONCE_LEN: usize = 12;

fn check_key(spec: &CipherSpec, key: &[u8]) -> Result<(), KeyStoreError> {
    if key.len() != spec.key_length {
        return Err(KeyStoreError::InvalidKeyLength {
            algorithm: spec.algorithm,
            expected: spec.key_length,
            actual: key.len(),
        });
    }
    Ok(())
}

/// Encrypt `plaintext` under `key` and `iv`.
///
/// `iv` is ignored by IV-less modes. `tag_length` is only consulted by AEAD
/// modes.
///
/// # Errors
///
/// Returns [`KeyStoreError::InvalidKeyLength`] for a key of the wrong size,
/// [`KeyStoreError::UnsupportedTagLength`] for a tag length the mode cannot
/// produce, and [`KeyStoreError::CipherFailure`] if the primitive rejects
/// the IV or the input.
pub(crate) fn seal(
    spec: &CipherSpec,
    key: &[u8],
    iv: &[u8],
    tag_length: usize,
    plaintext: &[u8],
) -> Result<Sealed, KeyStoreError> {
    check_key(spec, key)?;
    let failure = || KeyStoreError::CipherFailure(spec.algorithm);
    let unsupported_tag = || KeyStoreError::UnsupportedTagLength {
        algorithm: spec.algorithm,
        length: tag_length,
    };

    match spec.mode {
        CipherMode::Cbc => with_aes!(spec.key_length, |A| {
            let cipher = cbc::Encryptor::<A>::new_from_slices(key, iv).map_err(|_| failure())?;
            Ok(Sealed::unauthenticated(
                cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            ))
        }),
        CipherMode::Ecb => with_aes!(spec.key_length, |A| {
            let cipher = ecb::Encryptor::<A>::new_from_slice(key).map_err(|_| failure())?;
            Ok(Sealed::unauthenticated(
                cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            ))
        }),
        CipherMode::Ctr => with_aes!(spec.key_length, |A| {
            let mut buf = plaintext.to_vec();
            ctr::Ctr128BE::<A>::new_from_slices(key, iv)
                .map_err(|_| failure())?
                .apply_keystream(&mut buf);
            Ok(Sealed::unauthenticated(buf))
        }),
        CipherMode::Ofb => with_aes!(spec.key_length, |A| {
            let mut buf = plaintext.to_vec();
            ofb::Ofb::<A>::new_from_slices(key, iv)
                .map_err(|_| failure())?
                .apply_keystream(&mut buf);
            Ok(Sealed::unauthenticated(buf))
        }),
        CipherMode::Cfb => with_aes!(spec.key_length, |A| {
            let mut buf = plaintext.to_vec();
            cfb_mode::Encryptor::<A>::new_from_slices(key, iv)
                .map_err(|_| failure())?
                .encrypt(&mut buf);
            Ok(Sealed::unauthenticated(buf))
        }),
        CipherMode::Cfb8 => with_aes!(spec.key_length, |A| {
            let mut buf = plaintext.to_vec();
            cfb8::Encryptor::<A>::new_from_slices(key, iv)
                .map_err(|_| failure())?
                .encrypt(&mut buf);
            Ok(Sealed::unauthenticated(buf))
        }),
        CipherMode::Gcm => {
            if iv.len() != AEAD_NONCE_LEN {
                return Err(failure());
            }
            with_aes!(spec.key_length, |A| with_gcm_tag!(
                tag_length,
                |T| {
                    let cipher = AesGcm::<A, U12, T>::new_from_slice(key).map_err(|_| failure())?;
                    let mut buf = plaintext.to_vec();
                    let tag = cipher
                        .encrypt_in_place_detached(GenericArray::from_slice(iv), b"", &mut buf)
                        .map_err(|_| failure())?;
                    Ok(Sealed {
                        tag: Some(tag.to_vec()),
                        ciphertext: buf,
                    })
                },
                else Err(unsupported_tag())
            ))
        }
        CipherMode::Ccm => {
            if iv.len() != AEAD_NONCE_LEN {
                return Err(failure());
            }
            with_aes!(spec.key_length, |A| with_ccm_tag!(
                tag_length,
                |T| {
                    let cipher = Ccm::<A, T, U12>::new_from_slice(key).map_err(|_| failure())?;
                    let mut buf = plaintext.to_vec();
                    let tag = cipher
                        .encrypt_in_place_detached(GenericArray::from_slice(iv), b"", &mut buf)
                        .map_err(|_| failure())?;
                    Ok(Sealed {
                        tag: Some(tag.to_vec()),
                        ciphertext: buf,
                    })
                },
                else Err(unsupported_tag())
            ))
        }
    }
}

/// Decrypt `ciphertext` under `key`.
///
/// Returns `Ok(None)` whenever the input cannot be authenticated or
/// unpadded: a missing or wrongly sized IV, a missing tag on an AEAD mode, a
/// tag mismatch, or bad padding.
///
/// # Errors
///
/// Returns [`KeyStoreError::InvalidKeyLength`] for a key of the wrong size.
pub(crate) fn open(
    spec: &CipherSpec,
    key: &[u8],
    iv: Option<&[u8]>,
    tag: Option<&[u8]>,
    ciphertext: &[u8],
) -> Result<Option<Vec<u8>>, KeyStoreError> {
    check_key(spec, key)?;
    let iv = iv.unwrap_or_default();

    let plaintext = match spec.mode {
        CipherMode::Cbc => with_aes!(spec.key_length, |A| {
            cbc::Decryptor::<A>::new_from_slices(key, iv)
                .ok()
                .and_then(|cipher| cipher.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).ok())
        }),
        CipherMode::Ecb => with_aes!(spec.key_length, |A| {
            ecb::Decryptor::<A>::new_from_slice(key)
                .ok()
                .and_then(|cipher| cipher.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).ok())
        }),
        CipherMode::Ctr => with_aes!(spec.key_length, |A| {
            ctr::Ctr128BE::<A>::new_from_slices(key, iv)
                .ok()
                .map(|mut cipher| {
                    let mut buf = ciphertext.to_vec();
                    cipher.apply_keystream(&mut buf);
                    buf
                })
        }),
        CipherMode::Ofb => with_aes!(spec.key_length, |A| {
            ofb::Ofb::<A>::new_from_slices(key, iv).ok().map(|mut cipher| {
                let mut buf = ciphertext.to_vec();
                cipher.apply_keystream(&mut buf);
                buf
            })
        }),
        CipherMode::Cfb => with_aes!(spec.key_length, |A| {
            cfb_mode::Decryptor::<A>::new_from_slices(key, iv)
                .ok()
                .map(|cipher| {
                    let mut buf = ciphertext.to_vec();
                    cipher.decrypt(&mut buf);
                    buf
                })
        }),
        CipherMode::Cfb8 => with_aes!(spec.key_length, |A| {
            cfb8::Decryptor::<A>::new_from_slices(key, iv)
                .ok()
                .map(|cipher| {
                    let mut buf = ciphertext.to_vec();
                    cipher.decrypt(&mut buf);
                    buf
                })
        }),
        CipherMode::Gcm => {
            let Some(tag) = tag else { return Ok(None) };
            if iv.len() != AEAD_NONCE_LEN {
                return Ok(None);
            }
            with_aes!(spec.key_length, |A| with_gcm_tag!(
                tag.len(),
                |T| {
                    AesGcm::<A, U12, T>::new_from_slice(key).ok().and_then(|cipher| {
                        let mut buf = ciphertext.to_vec();
                        cipher
                            .decrypt_in_place_detached(
                                GenericArray::from_slice(iv),
                                b"",
                                &mut buf,
                                GenericArray::from_slice(tag),
                            )
                            .ok()
                            .map(|()| buf)
                    })
                },
                else None
            ))
        }
        CipherMode::Ccm => {
            let Some(tag) = tag else { return Ok(None) };
            if iv.len() != AEAD_NONCE_LEN {
                return Ok(None);
            }
            with_aes!(spec.key_length, |A| with_ccm_tag!(
                tag.len(),
                |T| {
                    Ccm::<A, T, U12>::new_from_slice(key).ok().and_then(|cipher| {
                        let mut buf = ciphertext.to_vec();
                        cipher
                            .decrypt_in_place_detached(
                                GenericArray::from_slice(iv),
                                b"",
                                &mut buf,
                                GenericArray::from_slice(tag),
                            )
                            .ok()
                            .map(|()| buf)
                    })
                },
                else None
            ))
        }
    };

    Ok(plaintext)
}
