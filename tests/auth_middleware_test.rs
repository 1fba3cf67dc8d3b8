use std::env;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use talentpool_backend::middleware;
use talentpool_backend::models::user::UserRole;
use talentpool_backend::routes;
use talentpool_backend::utils::token::issue_jwt;
use tower::ServiceExt;
use uuid::Uuid;

fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/talentpool_test");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("ADMIN_EMAIL", "admin@example.com");
    env::set_var("ADMIN_PASSWORD", "admin_password_1");
    env::set_var("ADMIN_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("RETENTION_DAYS", "180");
    let _ = talentpool_backend::config::init_config();
}

async fn ok_handler() -> &'static str {
    "ok"
}

fn admin_gated_app() -> Router {
    Router::new()
        .route("/protected", get(ok_handler))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_admin,
        ))
}

#[tokio::test]
async fn health_reports_ok() {
    let app = Router::new().route("/health", get(routes::health::health));
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    init_test_config();
    let app = admin_gated_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/protected")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    init_test_config();
    let app = admin_gated_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn candidate_role_is_forbidden() {
    init_test_config();
    let token = issue_jwt(Uuid::new_v4(), UserRole::Candidate).unwrap();
    let app = admin_gated_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_role_passes_through() {
    init_test_config();
    let token = issue_jwt(Uuid::new_v4(), UserRole::Admin).unwrap();
    let app = admin_gated_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn bearer_auth_accepts_any_role() {
    init_test_config();
    let app = Router::new().route("/me", get(ok_handler)).layer(
        axum::middleware::from_fn(middleware::auth::require_bearer_auth),
    );
    let token = issue_jwt(Uuid::new_v4(), UserRole::Candidate).unwrap();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn rate_limiter_rejects_over_limit() {
    init_test_config();
    let app = Router::new().route("/limited", get(ok_handler)).layer(
        axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(2),
            middleware::rate_limit::rps_middleware,
        ),
    );

    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/limited")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/limited")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}
