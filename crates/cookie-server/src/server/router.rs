//! Axum router construction.

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            "/cookies/:name",
            get(handlers::get_cookie)
                .put(handlers::set_cookie)
                .delete(handlers::delete_cookie),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{
            header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
            Method, Request, StatusCode,
        },
        response::Response,
    };
    use cookies::{JarOptions, TransportSecurity};
    use keystore::{EncryptionConfig, KeyStore, KeyStoreConfig, SigningConfig};
    use tower::ServiceExt;

    use crate::server::middleware::DEFAULT_REQUEST_TIMEOUT;

    fn app(signing: &[&str], encryption: Option<&str>) -> Router {
        let store = KeyStore::new(KeyStoreConfig {
            encryption: encryption.map(|k| EncryptionConfig::new([k])),
            signing: (!signing.is_empty()).then(|| SigningConfig::new(signing.iter().copied())),
        })
        .unwrap();
        build(
            AppState::new(JarOptions::new(Arc::new(store))),
            DEFAULT_REQUEST_TIMEOUT,
        )
    }

    fn put(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn set_cookie_lines(resp: &Response) -> Vec<String> {
        resp.headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_owned())
            .collect()
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app(&[], None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(resp).await["code"], "not_found");
    }

    #[tokio::test]
    async fn health_route_exists() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app(&[], None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn put_writes_signed_pair() {
        let resp = app(&["keyboard cat"], None)
            .oneshot(put("/cookies/foo", serde_json::json!({"value": "bar", "signed": true})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            set_cookie_lines(&resp),
            [
                "foo=bar; path=/; httponly",
                "foo.sig=iW2fuCIzk9Cg_rqLT1CAqrtdWs8; path=/; httponly",
            ]
        );
    }

    #[tokio::test]
    async fn put_secure_over_plain_http_is_400() {
        let resp = app(&[], None)
            .oneshot(put("/cookies/foo", serde_json::json!({"value": "bar", "secure": true})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(set_cookie_lines(&resp).is_empty());
        let body = json_body(resp).await;
        assert_eq!(body["code"], "bad_request");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("unencrypted connection"));
    }

    #[tokio::test]
    async fn put_secure_over_tls_is_accepted() {
        let mut req = put("/cookies/foo", serde_json::json!({"value": "bar", "secure": true}));
        req.extensions_mut().insert(TransportSecurity::Encrypted);
        let resp = app(&[], None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(set_cookie_lines(&resp), ["foo=bar; path=/; secure; httponly"]);
    }

    #[tokio::test]
    async fn put_rejects_invalid_name() {
        let resp = app(&[], None)
            .oneshot(put("/cookies/foo%0Abar", serde_json::json!({"value": "bar"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["message"], "argument name is invalid");
    }

    #[tokio::test]
    async fn put_rejects_out_of_range_max_age() {
        let resp = app(&["keyboard cat"], None)
            .oneshot(put(
                "/cookies/foo",
                serde_json::json!({"value": "bar", "max_age_secs": 400_000_000_000_i64, "signed": true}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(set_cookie_lines(&resp).is_empty());
        assert_eq!(json_body(resp).await["message"], "option maxAge is invalid");
    }

    #[tokio::test]
    async fn delete_writes_marker() {
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/cookies/foo")
            .body(Body::empty())
            .unwrap();
        let resp = app(&[], None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            set_cookie_lines(&resp),
            ["foo=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT; httponly"]
        );
    }

    #[tokio::test]
    async fn tampered_read_deletes_companion() {
        let req = Request::builder()
            .uri("/cookies/foo?signed=true")
            .header(COOKIE, "foo=bar; foo.sig=not-the-signature")
            .body(Body::empty())
            .unwrap();
        let resp = app(&["keyboard cat"], None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let lines = set_cookie_lines(&resp);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("foo.sig=; path=/; expires=Thu, 01 Jan 1970"));
        assert!(json_body(resp).await["value"].is_null());
    }

    #[tokio::test]
    async fn rotated_read_refreshes_signature() {
        let req = Request::builder()
            .uri("/cookies/foo?signed=true")
            .header(COOKIE, "foo=bar; foo.sig=NzdRHeORj7MtAMhSsILYRsyVNI8")
            .body(Body::empty())
            .unwrap();
        let resp = app(&["keyboard cat a", "keyboard cat b"], None)
            .oneshot(req)
            .await
            .unwrap();
        assert_eq!(
            set_cookie_lines(&resp),
            ["foo.sig=tecF04p5ua6TnfYxUTDskgWSKJE; path=/; httponly"]
        );
        assert_eq!(json_body(resp).await["value"], "bar");
    }

    #[tokio::test]
    async fn encrypted_write_reads_back() {
        let router = app(&[], Some("0123456789abcdef01234567"));
        let resp = router
            .clone()
            .oneshot(put("/cookies/foo", serde_json::json!({"value": "bar", "encrypted": true})))
            .await
            .unwrap();
        let lines = set_cookie_lines(&resp);
        assert_eq!(lines.len(), 1);
        let pair = lines[0].split(';').next().unwrap().to_owned();
        assert_ne!(pair, "foo=bar");

        let req = Request::builder()
            .uri("/cookies/foo?encrypted=true")
            .header(COOKIE, pair)
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(json_body(resp).await["value"], "bar");
    }
}
