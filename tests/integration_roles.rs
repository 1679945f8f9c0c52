mod common;

use axum::http::{Method, StatusCode};
use carlot::carlot_core::permissions::{
    CAR_READ, PERMISSION_CREATE, PERMISSION_DELETE, PERMISSION_READ, PERMISSION_UPDATE,
    ROLE_ASSIGN, ROLE_CREATE, ROLE_DELETE, ROLE_READ, ROLE_UPDATE,
};
use common::{TestApp, body_json, json_request, request, unique_email};
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_roles() {
    let app = TestApp::new().await;
    let admin = app
        .user_with(&unique_email(), &[ROLE_CREATE, ROLE_READ])
        .await;

    let created = app
        .send(json_request(
            Method::POST,
            "/api/v1/roles",
            Some(&admin.token),
            json!({ "name": "Sales", "slug": "sales", "description": "Sales staff" }),
        ))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(body_json(created).await["slug"], "sales");

    let duplicate = app
        .send(json_request(
            Method::POST,
            "/api/v1/roles",
            Some(&admin.token),
            json!({ "name": "Sales again", "slug": "sales" }),
        ))
        .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listed = app
        .send(request(Method::GET, "/api/v1/roles", Some(&admin.token)))
        .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let roles = body_json(listed).await;
    assert!(roles.as_array().unwrap().iter().any(|r| r["slug"] == "sales"));
}

#[tokio::test]
async fn test_invalid_role_slug_is_422() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[ROLE_CREATE]).await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/roles",
            Some(&admin.token),
            json!({ "name": "Bad", "slug": "Not A Slug" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_grant_and_revoke_through_api() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[ROLE_ASSIGN]).await;
    let reader = app.user_with(&unique_email(), &[]).await;
    let car_read = app.permission_ids[CAR_READ];
    let grant_uri = format!("/api/v1/roles/{}/permissions", reader.role_id);

    let denied = app
        .send(request(Method::GET, "/api/v1/cars", Some(&reader.token)))
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let granted = app
            .send(json_request(
                Method::POST,
                &grant_uri,
                Some(&admin.token),
                json!({ "permission_id": car_read }),
            ))
            .await;
        assert_eq!(granted.status(), StatusCode::NO_CONTENT);
    }

    let allowed = app
        .send(request(Method::GET, "/api/v1/cars", Some(&reader.token)))
        .await;
    assert_eq!(allowed.status(), StatusCode::OK);

    let revoke_uri = format!("{}/{}", grant_uri, car_read);
    let revoked = app
        .send(request(Method::DELETE, &revoke_uri, Some(&admin.token)))
        .await;
    assert_eq!(revoked.status(), StatusCode::NO_CONTENT);

    let again = app
        .send(request(Method::DELETE, &revoke_uri, Some(&admin.token)))
        .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let denied_again = app
        .send(request(Method::GET, "/api/v1/cars", Some(&reader.token)))
        .await;
    assert_eq!(denied_again.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_assign_unknown_role_is_404() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[ROLE_ASSIGN]).await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/roles/assign",
            Some(&admin.token),
            json!({ "user_id": admin.id, "role_id": 99_999 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_permission_catalogue() {
    let app = TestApp::new().await;
    let admin = app
        .user_with(&unique_email(), &[PERMISSION_READ, PERMISSION_CREATE])
        .await;

    let created = app
        .send(json_request(
            Method::POST,
            "/api/v1/permissions",
            Some(&admin.token),
            json!({ "name": "Export cars", "slug": "car-export", "module": "cars" }),
        ))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = app
        .send(request(Method::GET, "/api/v1/permissions", Some(&admin.token)))
        .await;
    let slugs: Vec<String> = body_json(listed)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect();
    assert!(slugs.contains(&"car-export".to_string()));
    assert!(slugs.contains(&CAR_READ.to_string()));
}

#[tokio::test]
async fn test_role_by_id_lifecycle() {
    let app = TestApp::new().await;
    let admin = app
        .user_with(&unique_email(), &[ROLE_READ, ROLE_UPDATE, ROLE_DELETE])
        .await;
    let uri = format!("/api/v1/roles/{}", admin.role_id);
    let token = Some(admin.token.as_str());

    let fetched = app.send(request(Method::GET, &uri, token)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["id"], admin.role_id.into_inner());

    let updated = app
        .send(json_request(
            Method::PUT,
            &uri,
            token,
            json!({ "name": "Administrators", "description": "Runs the lot" }),
        ))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["name"], "Administrators");
    assert_eq!(updated["description"], "Runs the lot");

    let missing = app
        .send(request(Method::GET, "/api/v1/roles/99999", token))
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let deleted = app.send(request(Method::DELETE, &uri, token)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let locked_out = app.send(request(Method::GET, &uri, token)).await;
    assert_eq!(locked_out.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_slug_update_conflict_is_409() {
    let app = TestApp::new().await;
    let admin = app.user_with(&unique_email(), &[ROLE_UPDATE]).await;
    let other = app.user_with(&unique_email(), &[]).await;

    let response = app
        .send(json_request(
            Method::PUT,
            &format!("/api/v1/roles/{}", admin.role_id),
            Some(&admin.token),
            json!({ "slug": format!("role-{}", other.id) }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_permission_by_id_lifecycle() {
    let app = TestApp::new().await;
    let admin = app
        .user_with(
            &unique_email(),
            &[PERMISSION_READ, PERMISSION_UPDATE, PERMISSION_DELETE],
        )
        .await;
    let viewer = app.user_with(&unique_email(), &[CAR_READ]).await;
    let car_read = app.permission_ids[CAR_READ];
    let uri = format!("/api/v1/permissions/{}", car_read);
    let token = Some(admin.token.as_str());

    let fetched = app.send(request(Method::GET, &uri, token)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["slug"], CAR_READ);

    let updated = app
        .send(json_request(
            Method::PUT,
            &uri,
            token,
            json!({ "name": "View inventory" }),
        ))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["name"], "View inventory");
    assert_eq!(updated["slug"], CAR_READ);

    let deleted = app.send(request(Method::DELETE, &uri, token)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app.send(request(Method::GET, &uri, token)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let denied = app
        .send(request(Method::GET, "/api/v1/cars", Some(&viewer.token)))
        .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_permission_update_needs_update_slug() {
    let app = TestApp::new().await;
    let reader = app.user_with(&unique_email(), &[PERMISSION_READ]).await;
    let uri = format!("/api/v1/permissions/{}", app.permission_ids[CAR_READ]);

    let response = app
        .send(json_request(
            Method::PUT,
            &uri,
            Some(&reader.token),
            json!({ "name": "Sneaky rename" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
