pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    category_service::CategoryService, job_service::JobService,
    profile_service::ProfileService, retention_service::RetentionService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub profile_service: ProfileService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub category_service: CategoryService,
    pub auth_service: AuthService,
    pub retention_service: RetentionService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let profile_service = ProfileService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let category_service = CategoryService::new(pool.clone());
        let auth_service = AuthService::new(pool.clone());
        let retention_service = RetentionService::new(config.email_webhook_url.clone());

        Self {
            pool,
            profile_service,
            job_service,
            application_service,
            category_service,
            auth_service,
            retention_service,
        }
    }
}
