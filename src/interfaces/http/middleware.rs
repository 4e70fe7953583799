//! Authentication and authorization middleware for Axum
//!
//! `auth_middleware` turns a `Bearer` token into an [`AuthenticatedUser`]
//! request extension. `authorize` and `admin_only` run after it and gate the
//! request on the caller's role.

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request},
    middleware::Next,
    response::Response,
};

use super::error::ApiError;
use crate::application::UserService;
use crate::domain::{Access, DomainError, UserRole};
use crate::infrastructure::crypto::TokenClaims;

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub claims: TokenClaims,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Result<Self, DomainError> {
        let user_id = claims.user_id().ok_or(DomainError::InvalidToken)?;
        Ok(Self {
            user_id,
            username: claims.username.clone(),
            role: claims.role(),
            claims,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(users: &UserService, request: &Request<Body>) -> Result<AuthenticatedUser, DomainError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(DomainError::Unauthorized)?;

    let token = extract_token(auth_header).ok_or(DomainError::InvalidToken)?;
    let claims = users.verify_token(token)?;
    AuthenticatedUser::from_claims(claims)
}

/// Require a valid bearer token.
pub async fn auth_middleware(
    State(users): State<UserService>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&users, &request)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Attach the caller if a valid token is present; never rejects.
pub async fn optional_auth_middleware(
    State(users): State<UserService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if request.headers().contains_key(header::AUTHORIZATION) {
        if let Ok(user) = authenticate(&users, &request) {
            request.extensions_mut().insert(user);
        }
    }
    next.run(request).await
}

/// Access level an HTTP method asks for.
pub fn access_for(method: &Method) -> Access {
    match *method {
        Method::POST => Access::Create,
        Method::PUT | Method::PATCH => Access::Update,
        Method::DELETE => Access::Delete,
        _ => Access::Read,
    }
}

fn caller(request: &Request<Body>) -> Result<&AuthenticatedUser, ApiError> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or(ApiError(DomainError::Unauthorized))
}

/// Gate by the role → verb permission table. Must run inside `auth_middleware`.
pub async fn authorize(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let access = access_for(request.method());
    let user = caller(&request)?;
    if !user.role.allows(access) {
        tracing::warn!(
            user_id = user.user_id,
            role = %user.role,
            method = %request.method(),
            path = %request.uri().path(),
            "Permission denied"
        );
        return Err(ApiError(DomainError::Forbidden));
    }
    Ok(next.run(request).await)
}

/// Admin-only regardless of verb. Must run inside `auth_middleware`.
pub async fn admin_only(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    if !caller(&request)?.is_admin() {
        return Err(ApiError(DomainError::Forbidden));
    }
    Ok(next.run(request).await)
}
