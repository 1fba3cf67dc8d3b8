use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use talentpool_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talentpool_backend=info,tower_http=info".into()),
        )
        .init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/public/jobs", get(routes::job_routes::list_jobs))
        .route("/api/public/jobs/:id", get(routes::job_routes::get_job))
        .route(
            "/api/public/categories",
            get(routes::job_routes::list_categories),
        )
        .route(
            "/api/candidate/register",
            post(routes::candidate_routes::register_candidate),
        )
        .route(
            "/api/candidate/:id",
            get(routes::candidate_routes::get_profile)
                .patch(routes::candidate_routes::update_profile),
        )
        .route(
            "/api/candidate/:id/cv",
            patch(routes::candidate_routes::update_cv),
        )
        .route(
            "/api/candidate/apply",
            post(routes::candidate_routes::apply_for_job),
        )
        .route(
            "/api/candidate/:id/applications",
            get(routes::candidate_routes::list_applications),
        )
        .route(
            "/api/candidate/:id/matches",
            get(routes::candidate_routes::list_matches),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/candidates",
            get(routes::admin_routes::list_candidates),
        )
        .route(
            "/api/admin/candidates/:id",
            get(routes::admin_routes::get_candidate)
                .delete(routes::admin_routes::delete_candidate),
        )
        .route(
            "/api/admin/applications",
            get(routes::admin_routes::list_applications),
        )
        .route(
            "/api/admin/applications/:id/status",
            post(routes::admin_routes::update_application_status),
        )
        .route(
            "/api/admin/applications/:id/rating",
            post(routes::admin_routes::rate_application),
        )
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
        .route(
            "/api/admin/jobs/:id/categories",
            post(routes::admin_routes::assign_categories),
        )
        .route(
            "/api/admin/categories",
            post(routes::admin_routes::create_category),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(routes::admin_routes::dashboard_stats),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(config.admin_rps),
            middleware::rate_limit::rps_middleware,
        ));

    // Operational endpoints: no body, JSON status out. Seeding must work
    // before any admin exists, so these sit outside the admin JWT gate.
    let ops_api = Router::new()
        .route("/api/ops/seed-admin", post(routes::admin_routes::seed_admin))
        .route(
            "/api/ops/retention-sweep",
            post(routes::admin_routes::retention_sweep),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::RateLimiter::per_second(config.admin_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .merge(ops_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
