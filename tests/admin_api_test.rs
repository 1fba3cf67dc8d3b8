//! Route wiring for the admin job surface. Uses a lazy pool so no request
//! here ever reaches Postgres: unauthenticated calls stop at the admin gate,
//! which is enough to tell a registered route from a missing one.

use std::env;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use talentpool_backend::middleware;
use talentpool_backend::models::user::UserRole;
use talentpool_backend::routes;
use talentpool_backend::utils::token::issue_jwt;
use talentpool_backend::AppState;
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

fn admin_jobs_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/talentpool_test")
        .expect("lazy pool");
    let state = AppState::new(pool);
    Router::new()
        .route(
            "/api/admin/jobs",
            get(routes::admin_routes::list_jobs).post(routes::admin_routes::create_job),
        )
        .route(
            "/api/admin/jobs/:id",
            get(routes::admin_routes::get_job)
                .patch(routes::admin_routes::update_job)
                .delete(routes::admin_routes::delete_job),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .with_state(state)
}

#[tokio::test]
async fn admin_job_detail_route_is_registered() {
    init_test_config();
    let app = admin_jobs_app();
    let id = Uuid::new_v4();
    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/admin/jobs/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    // The request must reach the admin gate, not fall through to a 404.
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_job_detail_rejects_candidate_tokens() {
    init_test_config();
    let token = issue_jwt(Uuid::new_v4(), UserRole::Candidate).unwrap();
    let app = admin_jobs_app();
    let id = Uuid::new_v4();
    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/admin/jobs/{id}"))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
