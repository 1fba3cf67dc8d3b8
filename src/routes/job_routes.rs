use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::filters::JobFilter,
    dto::job_dto::{JobListResponse, JobResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/jobs",
    params(
        ("search" = Option<String>, Query, description = "Substring across title and description"),
        ("location" = Option<String>, Query, description = "Location substring"),
        ("job_type" = Option<String>, Query, description = "Employment category or 'any'"),
        ("experience_level" = Option<String>, Query, description = "Seniority or 'any'")
    ),
    responses(
        (status = 200, description = "Filtered job postings", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(&filter).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(JobListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/public/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    get,
    path = "/api/public/categories",
    responses(
        (status = 200, description = "All job categories")
    )
)]
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.category_service.list().await?;
    Ok(Json(categories))
}
