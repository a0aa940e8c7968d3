//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LoginResponse};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::modules::users::UserHandlerState;

#[utoipa::path(
    post,
    path = "/usuarios/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Token issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), ApiError> {
    let issued = state
        .user_service
        .login(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(LoginResponse::from(issued))),
    ))
}
