mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{TestApp, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn signup_returns_profile_without_hash() {
    let app = TestApp::new().await;

    let (status, body) = app.signup("Alice@Example.com", "alice").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_i64());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts_regardless_of_other_fields() {
    let app = TestApp::new().await;
    app.signup("alice@example.com", "alice").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({
                "email": "alice@example.com",
                "username": "not-alice",
                "password": "a completely different password",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Case differences do not make a new address.
    let (status, _) = app.signup("ALICE@example.com", "alice2").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_signup_is_bad_request() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "email": "not-an-email", "username": "a", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = app.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signin_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.signup("alice@example.com", "alice").await;

    let (status, wrong_password) = app
        .send(
            Method::POST,
            "/signin",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_email) = app
        .send(
            Method::POST,
            "/signin",
            None,
            Some(json!({ "email": "bob@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn signin_token_identifies_the_user() {
    let app = TestApp::new().await;
    let (_, profile) = app.signup("alice@example.com", "alice").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/signin",
            None,
            Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");

    let token = body["token"].as_str().unwrap();
    assert_eq!(app.tokens.verify(token).unwrap(), profile["id"].as_i64().unwrap());

    let (status, me) = app.send(Method::GET, "/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, profile);
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::GET, "/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send_request(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (_, profile) = app.signup("alice@example.com", "alice").await;
    let user_id = profile["id"].as_i64().unwrap();

    let stale = app
        .tokens
        .issue_at(user_id, Utc::now() - Duration::hours(48))
        .unwrap();

    let (status, _) = app.send(Method::GET, "/me", Some(&stale.token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_for_vanished_user_is_not_found() {
    let app = TestApp::new().await;
    // A validly signed token for an id that was never created.
    let issued = app.tokens.issue(4242).unwrap();

    let (status, _) = app.send(Method::GET, "/me", Some(&issued.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_response_allows_cross_origin() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/journal")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let request = Request::builder()
        .uri("/me")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn unknown_path_is_not_found_without_a_token() {
    let app = TestApp::new().await;

    let (status, _) = app.send(Method::GET, "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Known protected paths are still gated.
    let (status, _) = app.send(Method::GET, "/journal", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
