use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        role: user.role,
    }))
}
