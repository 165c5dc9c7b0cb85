//! Request and response collaborators for [`CookieJar`](crate::CookieJar).
//!
//! The jar only needs two things from the transport: the raw `Cookie`
//! request header (plus whether the connection is encrypted) and read/write
//! access to the ordered `Set-Cookie` response lines. Implementations are
//! provided for the `http` crate types and for plain owned values.

use std::borrow::Cow;

use http::header::{COOKIE, SET_COOKIE};
use http::uri::Scheme;
use http::{Extensions, HeaderMap, HeaderValue, Request, Response, Uri};

use crate::error::CookieError;

/// Connection security, inserted as a request extension by whatever
/// terminates the connection.
///
/// When absent, the request URI scheme decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSecurity {
    /// Plain-text connection.
    Plain,
    /// TLS-terminated connection.
    Encrypted,
}

/// Read side of the jar: where request cookies come from.
pub trait CookieSource {
    /// The `Cookie` header as a single `name=value; name2=value2` string.
    fn cookie_header(&self) -> Option<Cow<'_, str>>;

    /// Whether the request arrived over an encrypted connection.
    fn is_secure(&self) -> bool;
}

/// Write side of the jar: where `Set-Cookie` lines go.
pub trait CookieSink {
    /// Current `Set-Cookie` lines, in order.
    fn set_cookie_lines(&self) -> Vec<String>;

    /// Replace every `Set-Cookie` line with `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::InvalidHeader`] if a line is not a legal header
    /// value.
    fn replace_set_cookie_lines(&mut self, lines: Vec<String>) -> Result<(), CookieError>;
}

/// Join every `Cookie` header with `"; "`.
fn joined_cookie_header(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    let mut values = headers
        .get_all(COOKIE)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()));
    let first = values.next()?;
    let Some(second) = values.next() else {
        return Some(first);
    };

    let mut joined = format!("{first}; {second}");
    for value in values {
        joined.push_str("; ");
        joined.push_str(&value);
    }
    Some(Cow::Owned(joined))
}

fn request_is_secure(extensions: &Extensions, uri: &Uri) -> bool {
    match extensions.get::<TransportSecurity>() {
        Some(security) => *security == TransportSecurity::Encrypted,
        None => uri.scheme() == Some(&Scheme::HTTPS),
    }
}

fn header_lines(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect()
}

fn replace_header_lines(headers: &mut HeaderMap, lines: Vec<String>) -> Result<(), CookieError> {
    let values = lines
        .iter()
        .map(|line| HeaderValue::from_str(line))
        .collect::<Result<Vec<_>, _>>()?;
    headers.remove(SET_COOKIE);
    for value in values {
        headers.append(SET_COOKIE, value);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

impl<B> CookieSource for Request<B> {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        joined_cookie_header(self.headers())
    }

    fn is_secure(&self) -> bool {
        request_is_secure(self.extensions(), self.uri())
    }
}

impl CookieSource for http::request::Parts {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        joined_cookie_header(&self.headers)
    }

    fn is_secure(&self) -> bool {
        request_is_secure(&self.extensions, &self.uri)
    }
}

/// Owned snapshot of the cookie-relevant parts of a request.
///
/// Lets a jar outlive the borrowed request it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies {
    header: Option<String>,
    secure: bool,
}

impl RequestCookies {
    pub fn new(header: Option<String>, secure: bool) -> Self {
        Self { header, secure }
    }

    /// Snapshot any [`CookieSource`].
    pub fn capture(source: &impl CookieSource) -> Self {
        Self {
            header: source.cookie_header().map(Cow::into_owned),
            secure: source.is_secure(),
        }
    }
}

impl CookieSource for RequestCookies {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        self.header.as_deref().map(Cow::Borrowed)
    }

    fn is_secure(&self) -> bool {
        self.secure
    }
}

impl<T: CookieSource + ?Sized> CookieSource for &T {
    fn cookie_header(&self) -> Option<Cow<'_, str>> {
        (**self).cookie_header()
    }

    fn is_secure(&self) -> bool {
        (**self).is_secure()
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

impl CookieSink for HeaderMap {
    fn set_cookie_lines(&self) -> Vec<String> {
        header_lines(self)
    }

    fn replace_set_cookie_lines(&mut self, lines: Vec<String>) -> Result<(), CookieError> {
        replace_header_lines(self, lines)
    }
}

impl<B> CookieSink for Response<B> {
    fn set_cookie_lines(&self) -> Vec<String> {
        header_lines(self.headers())
    }

    fn replace_set_cookie_lines(&mut self, lines: Vec<String>) -> Result<(), CookieError> {
        replace_header_lines(self.headers_mut(), lines)
    }
}

impl CookieSink for Vec<String> {
    fn set_cookie_lines(&self) -> Vec<String> {
        self.clone()
    }

    fn replace_set_cookie_lines(&mut self, lines: Vec<String>) -> Result<(), CookieError> {
        *self = lines;
        Ok(())
    }
}

impl<T: CookieSink + ?Sized> CookieSink for &mut T {
    fn set_cookie_lines(&self) -> Vec<String> {
        (**self).set_cookie_lines()
    }

    fn replace_set_cookie_lines(&mut self, lines: Vec<String>) -> Result<(), CookieError> {
        (**self).replace_set_cookie_lines(lines)
    }
}
