use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{ApplicationListResponse, ApplicationResponse, ApplyPayload},
    dto::job_dto::{JobMatchListResponse, JobMatchResponse},
    dto::profile_dto::{
        ProfileResponse, RegisterProfilePayload, UpdateCvPayload, UpdateProfilePayload,
    },
    error::{Error, Result},
    services::match_service::MatchService,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/candidate/register",
    request_body = RegisterProfilePayload,
    responses(
        (status = 201, description = "Profile created", body = Json<ProfileResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<RegisterProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    if state
        .profile_service
        .get_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "A profile with this email already exists".into(),
        ));
    }

    let (user, profile) = state
        .auth_service
        .register_candidate(&state.profile_service, &payload)
        .await?;
    let token = crate::utils::token::issue_jwt(user.id, user.role)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "profile": ProfileResponse::from(profile),
            "token": token,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidate/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile found", body = Json<ProfileResponse>),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_by_id(id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/candidate/{id}",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = Json<ProfileResponse>),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state.profile_service.update(id, &payload).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/candidate/{id}/cv",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = UpdateCvPayload,
    responses(
        (status = 200, description = "CV reference updated", body = Json<ProfileResponse>)
    )
)]
#[axum::debug_handler]
pub async fn update_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCvPayload>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.update_cv(id, &payload.cv_url).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    post,
    path = "/api/candidate/apply",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 404, description = "Profile or job not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_for_job(
    State(state): State<AppState>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_by_id(payload.profile_id).await?;
    // Existence check; a dangling job id should 404, not violate the FK.
    let _job = state.job_service.get_by_id(payload.job_id).await?;

    let application = state
        .application_service
        .apply(profile.id, payload.job_id, &profile.skills)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidate/{id}/applications",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Candidate's applications", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_for_profile(id).await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ApplicationListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/candidate/{id}/matches",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Jobs ranked by compatibility", body = Json<JobMatchListResponse>),
        (status = 404, description = "Profile not found")
    )
)]
#[axum::debug_handler]
pub async fn list_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get_by_id(id).await?;
    let jobs = state.job_service.list_all().await?;

    let experience = profile.experience_years.unwrap_or(0);
    let ranked = MatchService::rank_jobs(jobs, &profile.skills, experience);
    let items: Vec<JobMatchResponse> = ranked
        .into_iter()
        .map(|(job, match_result)| JobMatchResponse {
            job: job.into(),
            match_result,
        })
        .collect();
    Ok(Json(JobMatchListResponse { items }))
}
