#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use petstore_api::auth::{HmacTokenAuthority, TokenAuthority};
use petstore_api::{app, database, AppState};

/// Full router over a fresh in-memory database, plus the token authority so
/// tests can mint valid credentials.
pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<dyn TokenAuthority>,
}

pub async fn test_app() -> anyhow::Result<TestApp> {
    // One connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    database::migrate(&pool).await?;

    let tokens: Arc<dyn TokenAuthority> = Arc::new(HmacTokenAuthority::new("test-sign-key", 24));
    let state = AppState::new(pool, tokens.clone());

    Ok(TestApp {
        router: app(state),
        tokens,
    })
}

impl TestApp {
    pub fn bearer(&self) -> String {
        let token = self.tokens.issue("tester").expect("token issuance");
        format!("Bearer {token}")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails")
    }

    /// Authenticated JSON request against a protected route.
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: &serde_json::Value,
    ) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, self.bearer())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send_get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, self.bearer())
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is json")
}
