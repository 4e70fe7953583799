//! Admin user-management handlers

use axum::extract::{Extension, Path, Query, State};
use axum::Json;

use super::dto::{UpdateUserRequest, UserResponse};
use crate::application::UserService;
use crate::domain::{DomainError, UpdateUserDto, UserRole};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson};
use crate::interfaces::http::error::ApiResult;
use crate::interfaces::http::middleware::AuthenticatedUser;

pub async fn list_users(
    State(users): State<UserService>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<UserResponse>>>> {
    let page = users.list_users(params.normalize()).await?;
    Ok(Json(ApiResponse::success(page.into())))
}

pub async fn get_user(
    State(users): State<UserService>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = users.get_user(id).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn update_user(
    State(users): State<UserService>,
    Extension(admin): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let role = request
        .role
        .as_deref()
        .map(|name| {
            UserRole::parse(name)
                .ok_or_else(|| DomainError::validation(format!("Unknown role '{}'", name)))
        })
        .transpose()?;

    let demotes_self = role.is_some_and(|r| r != UserRole::Admin) || request.is_active == Some(false);
    if id == admin.user_id && demotes_self {
        return Err(DomainError::validation("Admins cannot demote or deactivate themselves").into());
    }

    let user = users
        .update_user(
            id,
            UpdateUserDto {
                full_name: request.full_name,
                role,
                is_active: request.is_active,
            },
        )
        .await?;
    Ok(Json(ApiResponse::with_message("User updated", user.into())))
}
