//! Shared fixtures for the router-level integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use http_body_util::BodyExt;
use journal_api::{
    adapters::DbAdapter,
    token::TokenService,
    web::{build_router, state::AppState},
};
use journal_core::{
    domain::EmotionAnalysis,
    ports::{EmotionAnalysisService, PortError, PortResult},
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct horse battery";

/// Any content containing this marker makes the fake analyzer fail.
pub const FAIL_MARKER: &str = "[fail]";

/// Deterministic stand-in for the language model.
#[derive(Default)]
pub struct FakeAnalyzer {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl EmotionAnalysisService for FakeAnalyzer {
    async fn analyze_emotion(&self, content: &str) -> PortResult<EmotionAnalysis> {
        self.calls.lock().unwrap().push(content.to_string());
        if content.contains(FAIL_MARKER) {
            return Err(PortError::Upstream("502 Bad Gateway: upstream down".to_string()));
        }
        Ok(EmotionAnalysis {
            emotion: format!("felt:{}", content),
            score: (content.len() as i64 * 7) % 101,
            advice: "Take a walk.".to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub analyzer: Arc<FakeAnalyzer>,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let db = Arc::new(DbAdapter::new(pool));
        db.run_migrations().await.expect("migrations");

        let analyzer = Arc::new(FakeAnalyzer::default());
        let tokens = Arc::new(TokenService::new(JWT_SECRET, Duration::hours(24)));
        let state = Arc::new(AppState {
            db,
            analyzer: analyzer.clone(),
            tokens: tokens.clone(),
        });

        Self {
            router: build_router(state),
            analyzer,
            tokens,
        }
    }

    /// Sends a request and returns the status and the body, parsed as JSON when possible.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn signup(&self, email: &str, username: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "email": email, "username": username, "password": PASSWORD })),
        )
        .await
    }

    /// Signs up and signs in, returning the bearer token.
    pub async fn register(&self, email: &str, username: &str) -> String {
        let (status, _) = self.signup(email, username).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self
            .send(
                Method::POST,
                "/signin",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token in signin response").to_string()
    }
}
