mod common;

use std::sync::Arc;

use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use axum::body::Body;
use carlot::carlot_auth::{FixedClock, issue_token_at};
use carlot::carlot_core::INVALID_CREDENTIAL_MESSAGE;
use carlot::carlot_core::permissions::CAR_READ;
use carlot::carlot_models::ids::UserId;
use common::{TEST_PASSWORD, TestApp, body_json, json_request, request, unique_email};
use serde_json::json;

const CARS: &str = "/api/v1/cars";

fn with_authorization(value: &str) -> Request<Body> {
    Request::builder()
        .uri(CARS)
        .header(header::AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;

    let response = app.send(request(Method::GET, "/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "up" }));
}

#[tokio::test]
async fn test_missing_authorization_is_401() {
    let app = TestApp::new().await;

    let response = app.send(request(Method::GET, CARS, None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn test_bad_token_body_matches_malformed_header_body() {
    let app = TestApp::new().await;

    let bad_token = app.send(with_authorization("Bearer badtoken")).await;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
    let bad_token = body_json(bad_token).await;

    for malformed in ["Basic abc", "bearer abc", "Bearer ", "Bearer a b", "Token"] {
        let response = app.send(with_authorization(malformed)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", malformed);
        assert_eq!(body_json(response).await, bad_token, "{}", malformed);
    }
}

#[tokio::test]
async fn test_non_ascii_authorization_is_malformed_not_missing() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .uri(CARS)
        .header(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["error"], INVALID_CREDENTIAL_MESSAGE);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_401() {
    let app = TestApp::new().await;
    let user = app.user_with(&unique_email(), &[CAR_READ]).await;

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let forged = issue_token_at(user.id, "some-other-secret", 3600, now).unwrap();

    let response = app.send(request(Method::GET, CARS, Some(&forged))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let app = TestApp::new().await;
    let user = app.user_with(&unique_email(), &[CAR_READ]).await;

    // Issued long ago with a one hour lifetime.
    let issuer = app.state.clone().with_clock(Arc::new(FixedClock(1_000_000)));
    let expired = issuer.codec.issue(user.id).unwrap();

    let response = app.send(request(Method::GET, CARS, Some(&expired))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let fresh = app.send(request(Method::GET, CARS, Some(&user.token))).await;
    assert_eq!(fresh.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_forbidden_not_500() {
    let app = TestApp::new().await;
    let token = app.state.codec.issue(UserId(9_999)).unwrap();

    let response = app.send(request(Method::GET, CARS, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_success_returns_usable_token() {
    let app = TestApp::new().await;
    let email = unique_email();
    app.user_with(&email, &[CAR_READ]).await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);

    let token = body["token"].as_str().unwrap();
    let cars = app.send(request(Method::GET, CARS, Some(token))).await;
    assert_eq!(cars.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    let email = unique_email();
    app.user_with(&email, &[]).await;

    let wrong_password = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({ "email": email, "password": "wrongpass" }),
        ))
        .await;
    let unknown_user = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({ "email": "nobody@test.com", "password": TEST_PASSWORD }),
        ))
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_password).await, body_json(unknown_user).await);
}

#[tokio::test]
async fn test_login_invalid_email_format_is_422() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({ "email": "not-an-email", "password": "password123" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_missing_password_is_400() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({ "email": "test@test.com" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "password is required");
}
