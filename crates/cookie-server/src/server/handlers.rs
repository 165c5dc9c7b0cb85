//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookies::GetOptions;
use tracing::debug;

use super::{extract::Cookies, state::AppState};
use crate::error::ServiceError;
use crate::protocol::{
    CookieResponse, DeleteQuery, ErrorResponse, HealthResponse, ReadQuery, SetCookieRequest,
};

/// `GET /cookies/:name`: read one request cookie.
///
/// Without query flags the raw value is returned. With `signed` or
/// `encrypted` present the value is verified and/or decrypted; a stale or
/// forged signature may queue a corrective `Set-Cookie`.
pub async fn get_cookie(
    Path(name): Path<String>,
    Query(query): Query<ReadQuery>,
    mut cookies: Cookies,
) -> Result<(Cookies, Json<CookieResponse>), ServiceError> {
    let value = if query.signed.is_none() && query.encrypted.is_none() {
        cookies.get(&name)?
    } else {
        let options = GetOptions {
            signed: query.signed,
            encrypted: query.encrypted,
            sign_identifier: None,
        };
        cookies.get_with(&name, &options)?
    };
    debug!(cookie = %name, found = value.is_some(), "cookie read");
    Ok((cookies, Json(CookieResponse { name, value })))
}

/// `PUT /cookies/:name`: queue a `Set-Cookie` for `name`.
pub async fn set_cookie(
    Path(name): Path<String>,
    mut cookies: Cookies,
    Json(req): Json<SetCookieRequest>,
) -> Result<(StatusCode, Cookies), ServiceError> {
    let (value, options) = req.into_parts()?;
    cookies.set(&name, value.as_deref(), &options)?;
    debug!(cookie = %name, "cookie written");
    Ok((StatusCode::NO_CONTENT, cookies))
}

/// `DELETE /cookies/:name`: queue a deletion marker for `name`.
pub async fn delete_cookie(
    Path(name): Path<String>,
    Query(query): Query<DeleteQuery>,
    mut cookies: Cookies,
) -> Result<(StatusCode, Cookies), ServiceError> {
    cookies.set(&name, None, &query.into_set_options())?;
    debug!(cookie = %name, "cookie deleted");
    Ok((StatusCode::NO_CONTENT, cookies))
}

/// `GET /health`: liveness check reporting which key rings are loaded.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        encryption_enabled: state.key_store().has_encryption_keys(),
        signing_enabled: state.key_store().has_signing_keys(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}
