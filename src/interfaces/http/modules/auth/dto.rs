//! Authentication DTOs

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::AuthResult;
use crate::infrastructure::crypto::TokenClaims;
use crate::interfaces::http::modules::users::UserResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3–50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 150, message = "email must be 1–150 characters"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: String,
    #[validate(length(min = 2, max = 150, message = "full_name must be 2–150 characters"))]
    pub full_name: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "new password must be 8–128 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl From<AuthResult> for AuthResponse {
    fn from(auth: AuthResult) -> Self {
        Self {
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
            user: auth.user.into(),
        }
    }
}

/// Decoded view of a presented token
#[derive(Debug, Serialize)]
pub struct TokenInfo {
    pub valid: bool,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<TokenClaims> for TokenInfo {
    fn from(claims: TokenClaims) -> Self {
        Self {
            valid: true,
            issued_at: Utc.timestamp_opt(claims.iat, 0).single(),
            expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
            user_id: claims.sub,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        }
    }
}
