//! User API handlers
//!
//! Thin wrappers delegating to `UserService` from the application/identity
//! layer. Registration is public, everything else sits behind the bearer
//! middleware.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::debug;

use super::dto::{RegisterUserRequest, UserDto};
use crate::application::identity::UserService;
use crate::interfaces::http::common::{ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Shared state of the `/usuarios` routes
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/usuarios/register",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserDto>),
        (status = 400, description = "Registration check failed"),
        (status = 409, description = "Username already registered"),
        (status = 422, description = "Malformed field"),
        (status = 503, description = "Address catalogue unavailable")
    )
)]
pub async fn register(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let view = state.user_service.register(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(view))),
    ))
}

#[utoipa::path(
    get,
    path = "/usuarios/all",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every user in registration order", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_all(
    State(state): State<UserHandlerState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = state.user_service.get_all().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/usuarios/{username}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let view = state.user_service.get_by_username(&username).await?;
    Ok(Json(ApiResponse::success(UserDto::from(view))))
}

#[utoipa::path(
    put,
    path = "/usuarios/{username}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "User replaced", body = ApiResponse<UserDto>),
        (status = 400, description = "Registration check failed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found"),
        (status = 409, description = "New username already registered")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    debug!(actor = %actor.username, target_user = %username, "Update requested");
    let view = state.user_service.update(&username, request.into()).await?;
    Ok(Json(ApiResponse::success(UserDto::from(view))))
}

#[utoipa::path(
    delete,
    path = "/usuarios/{username}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    debug!(actor = %actor.username, target_user = %username, "Delete requested");
    state.user_service.delete(&username).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
