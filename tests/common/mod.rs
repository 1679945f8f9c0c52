#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response, header};
use carlot::carlot_core::password::hash_password_with_cost;
use carlot::carlot_core::permissions;
use carlot::carlot_db::{CredentialStore, MemoryStore, RbacStore};
use carlot::carlot_models::ids::{PermissionId, RoleId, UserId};
use carlot::carlot_models::roles::{CreatePermissionDto, CreateRoleDto};
use carlot::carlot_models::users::NewUser;
use carlot::router::init_router;
use carlot::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub role_id: RoleId,
    pub token: String,
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub permission_ids: HashMap<&'static str, PermissionId>,
}

impl TestApp {
    /// An app over a fresh in-memory store holding every known permission.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let mut permission_ids = HashMap::new();

        for (slug, name, module) in permissions::ALL {
            let permission = store
                .create_permission(CreatePermissionDto {
                    name: name.to_string(),
                    slug: slug.to_string(),
                    module: Some(module.to_string()),
                })
                .await
                .unwrap();
            permission_ids.insert(*slug, permission.id);
        }

        let state = AppState::in_memory(store.clone());
        Self {
            store,
            state,
            permission_ids,
        }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    /// Create a user with its own role granting exactly `slugs`.
    pub async fn user_with(&self, email: &str, slugs: &[&str]) -> TestUser {
        let user = self
            .store
            .create_user(NewUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: hash_password_with_cost(TEST_PASSWORD, 4).unwrap(),
            })
            .await
            .unwrap();

        let role = self
            .store
            .create_role(CreateRoleDto {
                name: format!("Role for {}", email),
                slug: format!("role-{}", user.id),
                description: None,
            })
            .await
            .unwrap();

        for slug in slugs {
            self.grant(role.id, slug).await;
        }
        self.store.assign_role(user.id, role.id).await.unwrap();

        TestUser {
            id: user.id,
            email: user.email,
            role_id: role.id,
            token: self.state.codec.issue(user.id).unwrap(),
        }
    }

    pub async fn grant(&self, role_id: RoleId, slug: &str) {
        self.store
            .grant_permission(role_id, self.permission_ids[slug])
            .await
            .unwrap();
    }

    pub async fn revoke(&self, role_id: RoleId, slug: &str) {
        self.store
            .revoke_permission(role_id, self.permission_ids[slug])
            .await
            .unwrap();
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn unique_email() -> String {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    format!("user-{}@test.com", NEXT.fetch_add(1, Ordering::SeqCst))
}
