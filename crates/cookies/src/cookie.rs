//! The [`Cookie`] value object and its `Set-Cookie` rendering.
//!
//! # Header-safe text
//!
//! Names, values, paths and domains may only contain horizontal tab,
//! printable ASCII (`0x20..=0x7E`) and the Latin-1 upper half
//! (`0x80..=0xFF`). A name must also be non-empty.
//!
//! # Line grammar
//!
//! ```text
//! name=value[; path=P][; expires=HTTP-DATE][; domain=D][; samesite=lax|none|strict][; secure][; httponly]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::error::CookieError;

/// Returns `true` if every character of `text` is header-safe.
pub fn is_field_content(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, '\t' | '\u{20}'..='\u{7e}' | '\u{80}'..='\u{ff}'))
}

/// Render a timestamp as an RFC 7231 IMF-fixdate.
///
/// # Errors
///
/// Returns [`CookieError::DateFormat`] if the timestamp cannot be rendered.
pub fn http_date(at: OffsetDateTime) -> Result<String, CookieError> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    Ok(at.to_offset(UtcOffset::UTC).format(format)?)
}

// ---------------------------------------------------------------------------
// SameSite
// ---------------------------------------------------------------------------

/// The `SameSite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    /// No attribute is rendered.
    #[default]
    Disabled,
    /// `samesite=strict`.
    Strict,
    /// `samesite=lax`.
    Lax,
    /// `samesite=none`.
    None,
}

impl SameSite {
    /// The attribute token, or `None` when disabled.
    pub fn as_token(self) -> Option<&'static str> {
        match self {
            SameSite::Disabled => None,
            SameSite::Strict => Some("strict"),
            SameSite::Lax => Some("lax"),
            SameSite::None => Some("none"),
        }
    }
}

impl From<bool> for SameSite {
    fn from(enabled: bool) -> Self {
        if enabled {
            SameSite::Strict
        } else {
            SameSite::Disabled
        }
    }
}

impl FromStr for SameSite {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            "strict" | "true" => Ok(SameSite::Strict),
            "false" => Ok(SameSite::Disabled),
            _ => Err(CookieError::InvalidSameSite(s.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for SameSite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Token(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => Ok(SameSite::from(flag)),
            Repr::Token(token) => token.parse().map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Attributes applied to a cookie at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieAttributes {
    /// `path` attribute. An empty path renders nothing.
    pub path: Option<String>,
    /// `domain` attribute. An empty domain renders nothing.
    pub domain: Option<String>,
    /// Absolute expiry.
    pub expires: Option<OffsetDateTime>,
    /// Relative expiry; a non-zero value replaces `expires` at render time.
    pub max_age: Option<Duration>,
    /// `samesite` attribute.
    pub same_site: SameSite,
    /// `secure` flag. `None` lets the jar derive it from the transport.
    pub secure: Option<bool>,
    /// `httponly` flag.
    pub http_only: bool,
    /// Drop earlier `Set-Cookie` lines with the same name when this cookie
    /// is written.
    pub overwrite: bool,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            path: Some("/".to_owned()),
            domain: None,
            expires: None,
            max_age: None,
            same_site: SameSite::Disabled,
            secure: None,
            http_only: true,
            overwrite: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Cookie
// ---------------------------------------------------------------------------

/// A validated cookie ready to be rendered into a `Set-Cookie` line.
///
/// A cookie built without a value (or with an empty one) is a deletion
/// marker: its value is empty, it expires at the Unix epoch and any
/// `max_age` is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    name: String,
    value: String,
    path: Option<String>,
    domain: Option<String>,
    expires: Option<OffsetDateTime>,
    max_age: Option<Duration>,
    same_site: SameSite,
    secure: bool,
    http_only: bool,
    overwrite: bool,
}

impl Cookie {
    /// Build and validate a cookie.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::InvalidName`], [`CookieError::InvalidValue`],
    /// [`CookieError::InvalidPath`] or [`CookieError::InvalidDomain`] when
    /// the corresponding field is not header-safe text.
    pub fn new(
        name: impl Into<String>,
        value: Option<&str>,
        attributes: CookieAttributes,
    ) -> Result<Self, CookieError> {
        let name = name.into();
        if name.is_empty() || !is_field_content(&name) {
            return Err(CookieError::InvalidName);
        }
        let value = value.unwrap_or_default();
        if !is_field_content(value) {
            return Err(CookieError::InvalidValue);
        }

        let CookieAttributes {
            path,
            domain,
            mut expires,
            mut max_age,
            same_site,
            secure,
            http_only,
            overwrite,
        } = attributes;

        if value.is_empty() {
            expires = Some(OffsetDateTime::UNIX_EPOCH);
            max_age = None;
        }
        if path.as_deref().is_some_and(|p| !is_field_content(p)) {
            return Err(CookieError::InvalidPath);
        }
        if domain.as_deref().is_some_and(|d| !is_field_content(d)) {
            return Err(CookieError::InvalidDomain);
        }

        Ok(Self {
            name,
            value: value.to_owned(),
            path,
            domain,
            expires,
            max_age,
            same_site,
            secure: secure.unwrap_or(false),
            http_only,
            overwrite,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn expires(&self) -> Option<OffsetDateTime> {
        self.expires
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Returns `true` if this cookie instructs the client to drop it.
    pub fn is_deletion(&self) -> bool {
        self.value.is_empty()
    }

    pub(crate) fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    /// Turn this cookie into its signature companion, keeping every attribute.
    pub(crate) fn into_companion(mut self, name: String, signature: String) -> Self {
        self.name = name;
        self.value = signature;
        self
    }

    /// Render the `Set-Cookie` line, resolving `max_age` against the clock.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::DateFormat`] if the expiry cannot be rendered.
    pub fn header(&self) -> Result<String, CookieError> {
        self.header_at(OffsetDateTime::now_utc())
    }

    /// Render the `Set-Cookie` line as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::InvalidMaxAge`] if `now + max_age` is out of
    /// range and [`CookieError::DateFormat`] if the expiry cannot be rendered.
    pub fn header_at(&self, now: OffsetDateTime) -> Result<String, CookieError> {
        let mut header = self.to_string();

        let expires = match self.max_age {
            Some(age) if !age.is_zero() => {
                Some(now.checked_add(age).ok_or(CookieError::InvalidMaxAge)?)
            }
            _ => self.expires,
        };

        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            header.push_str("; path=");
            header.push_str(path);
        }
        if let Some(expires) = expires {
            header.push_str("; expires=");
            header.push_str(&http_date(expires)?);
        }
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            header.push_str("; domain=");
            header.push_str(domain);
        }
        if let Some(token) = self.same_site.as_token() {
            header.push_str("; samesite=");
            header.push_str(token);
        }
        if self.secure {
            header.push_str("; secure");
        }
        if self.http_only {
            header.push_str("; httponly");
        }
        Ok(header)
    }
}

/// The canonical `name=value` pair, which is also the signed text.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
