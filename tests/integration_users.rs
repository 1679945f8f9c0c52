mod common;

use axum::http::{Method, StatusCode};
use carlot::carlot_core::permissions::{
    CAR_READ, USER_CREATE, USER_DELETE, USER_READ, USER_UPDATE,
};
use common::{TestApp, body_json, json_request, request, unique_email};
use serde_json::json;

const USERS: &str = "/api/v1/users";

#[tokio::test]
async fn test_user_lifecycle() {
    let app = TestApp::new().await;
    let admin = app
        .user_with(
            &unique_email(),
            &[USER_CREATE, USER_READ, USER_UPDATE, USER_DELETE],
        )
        .await;
    let token = Some(admin.token.as_str());

    let created = app
        .send(json_request(
            Method::POST,
            USERS,
            token,
            json!({ "name": "Sam Seller", "email": "Sam@Dealer.com", "password": "forecourt-1" }),
        ))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let user = body_json(created).await;
    assert_eq!(user["email"], "sam@dealer.com");
    assert_eq!(user["is_active"], true);
    assert!(user.get("password_hash").is_none());
    let uri = format!("{}/{}", USERS, user["id"]);

    let fetched = app.send(request(Method::GET, &uri, token)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["name"], "Sam Seller");

    let updated = app
        .send(json_request(
            Method::PUT,
            &uri,
            token,
            json!({ "name": "Samantha Seller", "is_active": false }),
        ))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["name"], "Samantha Seller");
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["email"], "sam@dealer.com");

    let listed = app.send(request(Method::GET, USERS, token)).await;
    let emails: Vec<String> = body_json(listed)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_string())
        .collect();
    assert!(emails.contains(&"sam@dealer.com".to_string()));

    let deleted = app.send(request(Method::DELETE, &uri, token)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app.send(request(Method::GET, &uri, token)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let again = app.send(request(Method::DELETE, &uri, token)).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_created_user_can_log_in() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[USER_CREATE]).await;

    let created = app
        .send(json_request(
            Method::POST,
            USERS,
            Some(&admin.token),
            json!({ "name": "Pat", "email": "pat@dealer.com", "password": "showroom-22" }),
        ))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let login = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            json!({ "email": "pat@dealer.com", "password": "showroom-22" }),
        ))
        .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[USER_CREATE]).await;

    let response = app
        .send(json_request(
            Method::POST,
            USERS,
            Some(&admin.token),
            json!({ "name": "Copy", "email": admin.email.to_uppercase(), "password": "duplicate-1" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_user_payload_is_422() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[USER_CREATE]).await;

    let response = app
        .send(json_request(
            Method::POST,
            USERS,
            Some(&admin.token),
            json!({ "name": "Al", "email": "not-an-email", "password": "short" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "validation_failed");
}

#[tokio::test]
async fn test_read_only_user_cannot_delete_users() {
    let app = TestApp::new().await;
    let reader = app.user_with(&unique_email(), &[USER_READ]).await;

    let uri = format!("{}/{}", USERS, reader.id);
    let response = app.send(request(Method::DELETE, &uri, Some(&reader.token))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let still_there = app.send(request(Method::GET, &uri, Some(&reader.token))).await;
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deleted_user_token_loses_access() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[USER_DELETE]).await;
    let seller = app.user_with(&unique_email(), &[CAR_READ]).await;

    let before = app
        .send(request(Method::GET, "/api/v1/cars", Some(&seller.token)))
        .await;
    assert_eq!(before.status(), StatusCode::OK);

    let deleted = app
        .send(request(
            Method::DELETE,
            &format!("{}/{}", USERS, seller.id),
            Some(&admin.token),
        ))
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let after = app
        .send(request(Method::GET, "/api/v1/cars", Some(&seller.token)))
        .await;
    assert_eq!(after.status(), StatusCode::FORBIDDEN);
}
