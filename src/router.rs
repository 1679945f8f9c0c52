use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use carlot_cache::conditional_get;
use carlot_observability::logging_middleware;
use tower_http::cors::CorsLayer;

use crate::middleware::authenticate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::cars::router::init_cars_router;
use crate::modules::health::init_health_router;
use crate::modules::me::router::init_me_router;
use crate::modules::permissions::router::init_permissions_router;
use crate::modules::roles::router::init_roles_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Routes behind bearer authentication. The conditional-response stage wraps
/// them from the outside, so it sees the final status and body of every
/// GET, including rejections.
fn protected_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/cars", init_cars_router(state))
        .nest("/users", init_users_router(state))
        .nest("/roles", init_roles_router(state))
        .nest("/permissions", init_permissions_router(state))
        .nest("/me", init_me_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn(conditional_get))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::IF_NONE_MATCH,
        ])
        .expose_headers([axum::http::header::ETAG])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(init_health_router())
        .nest(
            "/api/v1",
            Router::new()
                .merge(init_auth_router())
                .merge(protected_router(&state)),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}
