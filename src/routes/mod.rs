pub mod admin_routes;
pub mod auth;
pub mod candidate_routes;
pub mod health;
pub mod job_routes;
