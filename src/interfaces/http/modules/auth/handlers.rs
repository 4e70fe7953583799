//! Authentication API handlers

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, TokenInfo};
use crate::application::{RegisterUser, UserService};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::ApiResult;
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserResponse;

pub async fn register(
    State(users): State<UserService>,
    caller: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let caller = caller.map(|Extension(user)| user.claims);
    let auth = users
        .register(
            RegisterUser {
                username: request.username,
                email: request.email,
                password: request.password,
                full_name: request.full_name,
                role: request.role,
            },
            caller.as_ref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User registered", auth.into())),
    ))
}

pub async fn login(
    State(users): State<UserService>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    let auth = users.login(&request.username, &request.password).await?;
    Ok(Json(ApiResponse::with_message("Login successful", auth.into())))
}

pub async fn validate_token(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<TokenInfo>> {
    Json(ApiResponse::with_message("Token is valid", user.claims.into()))
}

pub async fn current_user(
    State(users): State<UserService>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let account = users.current_user(&user.claims).await?;
    Ok(Json(ApiResponse::success(account.into())))
}

pub async fn change_password(
    State(users): State<UserService>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    users
        .change_password(user.user_id, &request.current_password, &request.new_password)
        .await?;
    Ok(Json(ApiResponse::with_message("Password changed", ())))
}
