//! [`CookieJar`]: reads and writes one request/response pair's cookies
//! through a shared [`KeyStore`].
//!
//! # Read protocol (signed)
//!
//! 1. Fetch `name` and its companion `name.<identifier>` from the `Cookie`
//!    header. Either missing means no value.
//! 2. Look up which ring key signed `name=value`.
//!    - no key: queue a deletion of the companion, return no value;
//!    - a retired key: queue a companion re-signed with the current key,
//!      return the value;
//!    - the current key: return the value.
//!
//! Corrective writes are plain (never signed nor encrypted) and land in the
//! response sink like any other `set`.

use std::fmt;
use std::sync::Arc;

use keystore::KeyStore;
use tracing::debug;

use crate::cookie::{Cookie, CookieAttributes};
use crate::error::CookieError;
use crate::pattern;
use crate::transport::{CookieSink, CookieSource};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How the signature companion's name is derived from a cookie name.
#[derive(Clone)]
pub enum SignIdentifier {
    /// `{name}.{suffix}`.
    Suffix(String),
    /// An arbitrary deterministic naming function.
    Deriver(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl SignIdentifier {
    /// Wrap a naming function.
    pub fn deriver(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        SignIdentifier::Deriver(Arc::new(f))
    }

    /// Name of the signature companion for `name`.
    pub fn companion(&self, name: &str) -> String {
        match self {
            SignIdentifier::Suffix(suffix) => format!("{name}.{suffix}"),
            SignIdentifier::Deriver(derive) => derive(name),
        }
    }
}

impl Default for SignIdentifier {
    fn default() -> Self {
        SignIdentifier::Suffix("sig".to_owned())
    }
}

impl From<&str> for SignIdentifier {
    fn from(suffix: &str) -> Self {
        SignIdentifier::Suffix(suffix.to_owned())
    }
}

impl fmt::Debug for SignIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignIdentifier::Suffix(suffix) => f.debug_tuple("Suffix").field(suffix).finish(),
            SignIdentifier::Deriver(_) => f.write_str("Deriver(..)"),
        }
    }
}

/// Jar-wide defaults.
#[derive(Debug, Clone)]
pub struct JarOptions {
    /// Keys used for every cryptographic transform.
    pub key_store: Arc<KeyStore>,
    /// Forces the transport-security decision. `None` asks the request.
    pub secure: Option<bool>,
    /// Sign cookies on `set` unless the call says otherwise.
    pub signed: bool,
    /// Encrypt on `set` and decrypt on `get` unless the call says otherwise.
    pub encrypted: bool,
    /// Companion naming.
    pub sign_identifier: SignIdentifier,
}

impl JarOptions {
    /// Defaults around a key store.
    pub fn new(key_store: Arc<KeyStore>) -> Self {
        Self {
            key_store,
            secure: None,
            signed: false,
            encrypted: false,
            sign_identifier: SignIdentifier::default(),
        }
    }
}

impl Default for JarOptions {
    fn default() -> Self {
        Self::new(Arc::new(KeyStore::default()))
    }
}

/// Per-call overrides for [`CookieJar::get_with`].
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Verify the companion signature. Defaults to whether the key store has
    /// signing keys.
    pub signed: Option<bool>,
    /// Decrypt the value. Defaults to the jar setting.
    pub encrypted: Option<bool>,
    /// Companion naming. Defaults to the jar setting.
    pub sign_identifier: Option<SignIdentifier>,
}

/// Per-call overrides for [`CookieJar::set`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Attributes of the written cookie (and of its companion).
    pub attributes: CookieAttributes,
    /// Also write a signature companion. Defaults to the jar setting.
    pub signed: Option<bool>,
    /// Encrypt the value first. Defaults to the jar setting.
    pub encrypted: Option<bool>,
    /// Companion naming. Defaults to the jar setting.
    pub sign_identifier: Option<SignIdentifier>,
}

impl SetOptions {
    /// Options for a write that is neither signed nor encrypted.
    pub fn plain(attributes: CookieAttributes) -> Self {
        Self {
            attributes,
            signed: Some(false),
            encrypted: Some(false),
            sign_identifier: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Jar
// ---------------------------------------------------------------------------

/// Cookie access for a single request/response pair.
///
/// A jar is not shared between requests; the [`KeyStore`] behind it is.
pub struct CookieJar<Req, Res> {
    request: Req,
    response: Res,
    options: JarOptions,
}

impl<Req, Res> CookieJar<Req, Res>
where
    Req: CookieSource,
    Res: CookieSink,
{
    pub fn new(request: Req, response: Res, options: JarOptions) -> Self {
        Self {
            request,
            response,
            options,
        }
    }

    pub fn request(&self) -> &Req {
        &self.request
    }

    pub fn response(&self) -> &Res {
        &self.response
    }

    pub fn options(&self) -> &JarOptions {
        &self.options
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.options.key_store
    }

    /// Release the collaborators.
    pub fn into_parts(self) -> (Req, Res) {
        (self.request, self.response)
    }

    /// Release the response sink with every queued `Set-Cookie` line.
    pub fn into_response(self) -> Res {
        self.response
    }

    /// Read `name` without signature verification.
    ///
    /// This never consults the jar's `signed` default; use
    /// [`CookieJar::get_with`] to verify. The value is decrypted when the jar
    /// encrypts by default.
    ///
    /// # Errors
    ///
    /// Returns key store configuration errors from decryption.
    pub fn get(&self, name: &str) -> Result<Option<String>, CookieError> {
        let Some(value) = self.raw(name)? else {
            return Ok(None);
        };
        self.reveal(value, self.options.encrypted)
    }

    /// Read `name`, verifying its signature companion unless told otherwise.
    ///
    /// When `options.signed` is `None`, verification happens iff the key
    /// store has signing keys; the jar's own `signed` default only governs
    /// writes. A companion that matches no key is deleted; one that matches a
    /// retired key is re-signed with the current key.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::KeyStore`] when verification or decryption is
    /// requested without keys, and header errors from corrective writes.
    pub fn get_with(
        &mut self,
        name: &str,
        options: &GetOptions,
    ) -> Result<Option<String>, CookieError> {
        let identifier = options
            .sign_identifier
            .as_ref()
            .unwrap_or(&self.options.sign_identifier);
        let companion = identifier.companion(name);
        let signed = options
            .signed
            .unwrap_or_else(|| self.options.key_store.has_signing_keys());
        let encrypted = options.encrypted.unwrap_or(self.options.encrypted);

        let Some(value) = self.raw(name)? else {
            return Ok(None);
        };
        if !signed {
            return self.reveal(value, encrypted);
        }

        let Some(remote) = self.raw(&companion)?.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        let data = format!("{name}={value}");
        match self.options.key_store.index_of(&data, &remote)? {
            None => {
                debug!(cookie = %companion, "signature matches no key, deleting companion");
                self.set(&companion, None, &SetOptions::plain(CookieAttributes::default()))?;
                Ok(None)
            }
            Some(0) => self.reveal(value, encrypted),
            Some(index) => {
                debug!(cookie = %companion, index, "refreshing signature under current key");
                let fresh = self.options.key_store.sign(&data)?;
                self.set(
                    &companion,
                    fresh.as_deref(),
                    &SetOptions::plain(CookieAttributes::default()),
                )?;
                self.reveal(value, encrypted)
            }
        }
    }

    /// Queue a `Set-Cookie` line for `name`, plus its signature companion
    /// when signing.
    ///
    /// `None` (or an empty value) writes a deletion marker. Returns the jar
    /// for chaining.
    ///
    /// # Errors
    ///
    /// - [`CookieError::InsecureTransport`] if `secure` is requested on a
    ///   plain-text transport (unless the jar forces `secure`).
    /// - Validation errors from [`Cookie::new`].
    /// - [`CookieError::KeyStore`] when encrypting or signing without keys.
    pub fn set(
        &mut self,
        name: &str,
        value: Option<&str>,
        options: &SetOptions,
    ) -> Result<&mut Self, CookieError> {
        let secure = self
            .options
            .secure
            .unwrap_or_else(|| self.request.is_secure());
        let encrypted = options.encrypted.unwrap_or(self.options.encrypted);
        let signed = options.signed.unwrap_or(self.options.signed);

        let sealed = match value {
            Some(plain) if encrypted => self.options.key_store.encrypt(plain)?,
            other => other.map(str::to_owned),
        };

        let mut cookie = Cookie::new(name, sealed.as_deref(), options.attributes.clone())?;

        let requested = options.attributes.secure;
        if requested == Some(true) && !secure {
            return Err(CookieError::InsecureTransport);
        }
        cookie.set_secure(requested.unwrap_or(secure));

        let mut lines = self.response.set_cookie_lines();
        push_cookie(&mut lines, &cookie)?;

        if signed {
            let signature = self
                .options
                .key_store
                .sign(&cookie.to_string())?
                .unwrap_or_default();
            let identifier = options
                .sign_identifier
                .as_ref()
                .unwrap_or(&self.options.sign_identifier);
            let companion = identifier.companion(cookie.name());
            push_cookie(&mut lines, &cookie.into_companion(companion, signature))?;
        }

        self.response.replace_set_cookie_lines(lines)?;
        Ok(self)
    }

    fn raw(&self, name: &str) -> Result<Option<String>, CookieError> {
        match self.request.cookie_header() {
            Some(header) => pattern::extract(&header, name),
            None => Ok(None),
        }
    }

    fn reveal(&self, value: String, encrypted: bool) -> Result<Option<String>, CookieError> {
        if encrypted {
            Ok(self.options.key_store.decrypt(&value)?)
        } else {
            Ok(Some(value))
        }
    }
}

/// Append `cookie`, first dropping lines for the same name when it overwrites.
///
/// Matching is by `name=` prefix only; path and domain are ignored.
fn push_cookie(lines: &mut Vec<String>, cookie: &Cookie) -> Result<(), CookieError> {
    if cookie.overwrite() {
        let prefix = format!("{}=", cookie.name());
        lines.retain(|line| !line.starts_with(&prefix));
    }
    lines.push(cookie.header()?);
    Ok(())
}
