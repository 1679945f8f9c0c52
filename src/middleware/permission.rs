use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use carlot_core::AuthError;
use carlot_rbac::PermissionResolver;

use crate::middleware::auth::Identity;
use crate::state::AppState;

/// State of one authorization stage: the resolver and the slug the route
/// requires.
#[derive(Clone, Debug)]
pub struct PermissionGate {
    resolver: PermissionResolver,
    slug: &'static str,
}

impl PermissionGate {
    pub fn new(resolver: PermissionResolver, slug: &'static str) -> Self {
        Self { resolver, slug }
    }

    pub fn slug(&self) -> &'static str {
        self.slug
    }
}

/// Authorization stage. Requires an [`Identity`] bound by
/// [`authenticate`](crate::middleware::auth::authenticate).
///
/// Fails closed: when the permission set cannot be resolved the request is
/// rejected with a 500, never let through.
pub async fn authorize(
    State(gate): State<PermissionGate>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = req
        .extensions()
        .get::<Identity>()
        .copied()
        .ok_or_else(|| {
            tracing::error!(permission = gate.slug, "authorization ran without an identity");
            AuthError::Unauthenticated
        })?;

    let allowed = gate
        .resolver
        .has(identity.user_id, gate.slug)
        .await
        .map_err(|_| AuthError::PermissionCheckFailed)?;

    if !allowed {
        tracing::warn!(
            user_id = %identity.user_id,
            permission = gate.slug,
            "permission denied"
        );
        return Err(AuthError::Forbidden(gate.slug.to_string()));
    }

    Ok(next.run(req).await)
}

/// Gate every method of `route` behind `slug`.
pub fn require_permission(
    state: &AppState,
    slug: &'static str,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let gate = PermissionGate::new(state.resolver.clone(), slug);
    route.route_layer(middleware::from_fn_with_state(gate, authorize))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use carlot_core::{ErrorBody, INTERNAL_ERROR_MESSAGE, permissions::CAR_READ};
    use carlot_db::MemoryStore;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_gate_without_authentication_is_500_and_skips_handler() {
        let state = AppState::in_memory(Arc::new(MemoryStore::new()));
        let reached = Arc::new(AtomicBool::new(false));
        let flag = reached.clone();
        let handler = get(move || {
            let flag = flag.clone();
            async move {
                flag.store(true, Ordering::SeqCst);
                "listed"
            }
        });

        let app = Router::new()
            .route("/cars", require_permission(&state, CAR_READ, handler))
            .with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/cars")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[test]
    fn test_gate_keeps_its_slug() {
        let state = AppState::in_memory(Arc::new(MemoryStore::new()));
        let gate = PermissionGate::new(state.resolver.clone(), CAR_READ);
        assert_eq!(gate.slug(), CAR_READ);
    }
}
