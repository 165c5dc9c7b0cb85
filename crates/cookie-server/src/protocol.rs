//! JSON request and response bodies of the cookie API.

use cookies::{CookieAttributes, SameSite, SetOptions};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::error::ServiceError;

// ---------------------------------------------------------------------------
// Cookie endpoints
// ---------------------------------------------------------------------------

/// Query string of `GET /cookies/:name`.
///
/// With neither flag present the cookie is read raw (no signature check);
/// with either present, `signed` defaults to whether signing keys exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadQuery {
    pub signed: Option<bool>,
    pub encrypted: Option<bool>,
}

/// Query string of `DELETE /cookies/:name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    /// Also delete the signature companion.
    pub signed: Option<bool>,
    /// Path of the cookie being deleted. Defaults to `/`.
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl DeleteQuery {
    /// Jar options for the deletion write.
    pub fn into_set_options(self) -> SetOptions {
        let defaults = CookieAttributes::default();
        SetOptions {
            attributes: CookieAttributes {
                path: self.path.or(defaults.path),
                domain: self.domain,
                ..defaults
            },
            signed: self.signed,
            encrypted: Some(false),
            sign_identifier: None,
        }
    }
}

/// Response body of `GET /cookies/:name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieResponse {
    pub name: String,
    /// `null` when the cookie is absent, failed verification, or did not
    /// decrypt.
    pub value: Option<String>,
}

/// Request body of `PUT /cookies/:name`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCookieRequest {
    /// New value; `null` or empty writes a deletion marker.
    #[serde(default)]
    pub value: Option<String>,
    /// Defaults to `/`; an empty string omits the attribute.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Absolute expiry as RFC 3339.
    #[serde(default)]
    pub expires: Option<String>,
    /// Relative expiry in seconds.
    #[serde(default)]
    pub max_age_secs: Option<i64>,
    /// `true`, `false`, `"lax"`, `"none"` or `"strict"`.
    #[serde(default)]
    pub same_site: SameSite,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default = "default_http_only")]
    pub http_only: bool,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub signed: Option<bool>,
    #[serde(default)]
    pub encrypted: Option<bool>,
}

fn default_http_only() -> bool {
    true
}

impl SetCookieRequest {
    /// Split into the value to write and the jar options for the write.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::BadRequest`] if `expires` is not RFC 3339.
    pub fn into_parts(self) -> Result<(Option<String>, SetOptions), ServiceError> {
        let expires = self
            .expires
            .as_deref()
            .map(|raw| OffsetDateTime::parse(raw, &Rfc3339))
            .transpose()
            .map_err(|e| ServiceError::BadRequest(format!("expires is not RFC 3339: {e}")))?;

        let defaults = CookieAttributes::default();
        let attributes = CookieAttributes {
            path: self.path.or(defaults.path),
            domain: self.domain,
            expires,
            max_age: self.max_age_secs.map(Duration::seconds),
            same_site: self.same_site,
            secure: self.secure,
            http_only: self.http_only,
            overwrite: self.overwrite,
        };

        let options = SetOptions {
            attributes,
            signed: self.signed,
            encrypted: self.encrypted,
            sign_identifier: None,
        };
        Ok((self.value, options))
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is accepting requests.
    pub status: String,
    /// Whether encrypted cookies can be served.
    pub encryption_enabled: bool,
    /// Whether signed cookies can be served.
    pub signing_enabled: bool,
}
