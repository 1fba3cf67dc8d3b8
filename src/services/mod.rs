pub mod application_service;
pub mod archive_service;
pub mod auth_service;
pub mod category_service;
pub mod job_service;
pub mod match_service;
pub mod profile_service;
pub mod retention_service;
