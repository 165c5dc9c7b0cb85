//! Per-request cookie jar extractor.
//!
//! `Cookies` reads from the request's `Cookie` header and collects
//! `Set-Cookie` lines, which are appended to the response when the jar is
//! returned from a handler.

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::SET_COOKIE, request::Parts, HeaderMap},
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use cookies::{CookieJar, RequestCookies};

use super::state::AppState;

/// A cookie jar bound to the current request.
pub struct Cookies(CookieJar<RequestCookies, HeaderMap>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Cookies
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let request = RequestCookies::capture(&*parts);
        let options = (*state.jar_options).clone();
        Ok(Self(CookieJar::new(request, HeaderMap::new(), options)))
    }
}

impl Deref for Cookies {
    type Target = CookieJar<RequestCookies, HeaderMap>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Cookies {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl IntoResponseParts for Cookies {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let queued = self.0.into_response();
        for value in queued.get_all(SET_COOKIE) {
            res.headers_mut().append(SET_COOKIE, value.clone());
        }
        Ok(res)
    }
}

impl IntoResponse for Cookies {
    fn into_response(self) -> Response {
        (self, ()).into_response()
    }
}
