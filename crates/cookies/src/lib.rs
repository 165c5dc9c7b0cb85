//! Signed and encrypted HTTP cookies.
//!
//! A [`CookieJar`] wraps one request/response pair. Reads pull values out of
//! the `Cookie` header and, when asked, verify a companion signature cookie
//! and decrypt the value. Writes queue `Set-Cookie` lines and optionally
//! encrypt the value and add the companion. All cryptography goes through a
//! shared [`keystore::KeyStore`].

pub mod cookie;
pub mod error;
pub mod jar;
pub mod pattern;
pub mod transport;

pub use cookie::{Cookie, CookieAttributes, SameSite};
pub use error::CookieError;
pub use jar::{CookieJar, GetOptions, JarOptions, SetOptions, SignIdentifier};
pub use pattern::PatternCache;
pub use transport::{CookieSink, CookieSource, RequestCookies, TransportSecurity};

pub use keystore;
