//! Registration atomicity against a live database. Ignored by default; run
//! with `cargo test -- --ignored` and DATABASE_URL pointing at a scratch
//! Postgres.

use std::env;

use talentpool_backend::dto::profile_dto::RegisterProfilePayload;
use talentpool_backend::models::profile::{Availability, VisaStatus};
use talentpool_backend::services::auth_service::AuthService;
use talentpool_backend::services::profile_service::ProfileService;
use uuid::Uuid;

fn init_test_config() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    if env::var("DATABASE_URL").is_err() {
        env::set_var("DATABASE_URL", "postgres://localhost/talentpool_test");
    }
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("ADMIN_EMAIL", "admin@example.com");
    env::set_var("ADMIN_PASSWORD", "admin_password_1");
    env::set_var("ADMIN_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("RETENTION_DAYS", "180");
    let _ = talentpool_backend::config::init_config();
}

#[tokio::test]
#[ignore]
async fn failed_profile_insert_leaves_no_user_row() {
    init_test_config();
    let pool = talentpool_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    // Occupy the profile email without a matching users row, so the account
    // insert succeeds and the profile insert hits the unique constraint.
    let email = format!("ghost_{}@example.com", Uuid::new_v4());
    sqlx::query(
        "INSERT INTO profiles (email, name, visa_status, availability) \
         VALUES ($1, 'Ghost', 'citizen', 'immediate')",
    )
    .bind(&email)
    .execute(&pool)
    .await
    .expect("seed profile");

    let auth = AuthService::new(pool.clone());
    let profiles = ProfileService::new(pool.clone());
    let payload = RegisterProfilePayload {
        email: email.clone(),
        name: "Ghost".into(),
        password: "correct horse battery".into(),
        bio: None,
        links: vec![],
        skills: vec![],
        experience_years: None,
        current_location: None,
        visa_status: VisaStatus::Citizen,
        availability: Availability::Immediate,
    };
    let result = auth.register_candidate(&profiles, &payload).await;
    assert!(result.is_err());

    // The rollback must discard the users row too, or this email could
    // never complete registration.
    let user: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await
        .expect("user lookup");
    assert!(user.is_none());
}
