use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplicationListResponse, ApplicationResponse,
        RateApplicationPayload, UpdateApplicationStatusPayload,
    },
    dto::filters::ProfileFilter,
    dto::job_dto::{
        AssignCategoriesPayload, CreateCategoryPayload, CreateJobPayload, JobListResponse,
        JobResponse, UpdateJobPayload,
    },
    dto::profile_dto::{ProfileListResponse, ProfileResponse},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/candidates",
    params(
        ("search" = Option<String>, Query, description = "Substring across name, email and bio"),
        ("experience" = Option<String>, Query, description = "Bracket key 0/2/4/7 or 'any'"),
        ("location" = Option<String>, Query, description = "Location substring"),
        ("skills" = Option<String>, Query, description = "Comma-separated skills, overlap match"),
        ("visa_status" = Option<String>, Query, description = "Visa status or 'any'"),
        ("availability" = Option<String>, Query, description = "Availability or 'any'")
    ),
    responses(
        (status = 200, description = "Filtered candidate profiles", body = Json<ProfileListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(filter): Query<ProfileFilter>,
) -> Result<impl IntoResponse> {
    let profiles = state.profile_service.list(&filter).await?;
    let items: Vec<ProfileResponse> = profiles.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ProfileListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/admin/candidates/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile found", body = Json<ProfileResponse>),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_by_id(id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/candidates/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 204, description = "Profile purged"),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.profile_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/applications",
    params(
        ("job_id" = Option<Uuid>, Query, description = "Restrict to one job"),
        ("status" = Option<String>, Query, description = "Restrict to one status")
    ),
    responses(
        (status = 200, description = "Applications", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list(&query).await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ApplicationListResponse { items, total }))
}

#[utoipa::path(
    post,
    path = "/api/admin/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/admin/applications/{id}/rating",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = RateApplicationPayload,
    responses(
        (status = 200, description = "Rating saved", body = Json<ApplicationResponse>)
    )
)]
#[axum::debug_handler]
pub async fn rate_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_rating(id, payload.rating)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    responses(
        (status = 200, description = "All jobs", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_all().await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(JobListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
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
    patch,
    path = "/api/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, &payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Category created")
    )
)]
#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let category = state.category_service.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    post,
    path = "/api/admin/jobs/{id}/categories",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = AssignCategoriesPayload,
    responses(
        (status = 200, description = "Categories assigned")
    )
)]
#[axum::debug_handler]
pub async fn assign_categories(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignCategoriesPayload>,
) -> Result<impl IntoResponse> {
    let _job = state.job_service.get_by_id(id).await?;
    let links = state
        .category_service
        .assign(id, &payload.category_ids)
        .await?;
    Ok(Json(links))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    responses(
        (status = 200, description = "Application status counts")
    )
)]
#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let status_counts = state.application_service.status_counts().await?;
    let total: i64 = status_counts.values().sum();
    Ok(Json(json!({
        "applications_total": total,
        "applications_by_status": status_counts,
    })))
}

#[utoipa::path(
    post,
    path = "/api/ops/seed-admin",
    responses(
        (status = 200, description = "Admin account present", body = Json<serde_json::Value>)
    )
)]
#[axum::debug_handler]
pub async fn seed_admin(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let created = state.auth_service.seed_admin().await?;
    Ok(Json(json!({
        "status": "ok",
        "created": created,
    })))
}

#[utoipa::path(
    post,
    path = "/api/ops/retention-sweep",
    responses(
        (status = 200, description = "Sweep outcome", body = Json<serde_json::Value>)
    )
)]
#[axum::debug_handler]
pub async fn retention_sweep(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let outcome = state
        .retention_service
        .run_sweep(&state.profile_service)
        .await?;
    Ok(Json(json!({
        "status": "ok",
        "scanned": outcome.scanned,
        "notified": outcome.notified,
        "failed": outcome.failed,
    })))
}
