//! Error types for cookie construction and jar operations.

use keystore::KeyStoreError;
use thiserror::Error;

/// Errors raised while building, reading or writing cookies.
#[derive(Debug, Error)]
pub enum CookieError {
    /// The cookie name is empty or contains characters outside the
    /// header-safe set.
    #[error("argument name is invalid")]
    InvalidName,

    /// The cookie value contains characters outside the header-safe set.
    #[error("argument value is invalid")]
    InvalidValue,

    /// The `path` attribute contains characters outside the header-safe set.
    #[error("option path is invalid")]
    InvalidPath,

    /// The `domain` attribute contains characters outside the header-safe set.
    #[error("option domain is invalid")]
    InvalidDomain,

    /// The `samesite` token is not one of `lax`, `none`, `strict`, `true`, `false`.
    #[error("option sameSite is invalid: {0}")]
    InvalidSameSite(String),

    /// `max_age` pushes the expiry past the representable date range.
    #[error("option maxAge is invalid")]
    InvalidMaxAge,

    /// A `secure` cookie was requested on a plain-text connection.
    #[error("cannot send secure cookie over unencrypted connection")]
    InsecureTransport,

    /// A key store configuration error surfaced while encrypting, decrypting
    /// or signing.
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    /// The name-matching pattern for a cookie could not be compiled.
    #[error("invalid cookie name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A rendered `Set-Cookie` line is not a legal header value.
    #[error("invalid set-cookie header: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// An expiry date could not be rendered as an HTTP date.
    #[error("failed to format cookie expiry: {0}")]
    DateFormat(#[from] time::error::Format),
}

impl CookieError {
    /// Returns `true` for errors caused by caller input rather than server
    /// configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CookieError::InvalidName
                | CookieError::InvalidValue
                | CookieError::InvalidPath
                | CookieError::InvalidDomain
                | CookieError::InvalidSameSite(_)
                | CookieError::InvalidMaxAge
                | CookieError::InsecureTransport
        )
    }
}
