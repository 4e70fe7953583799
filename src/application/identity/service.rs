//! User management service: application-layer orchestration
//!
//! Registration, login, token verification, password changes and the
//! admin-side account operations. HTTP handlers are thin wrappers that
//! delegate here.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::{
    DomainError, DomainResult, Email, Identifiable, UpdateUserDto, User, UserRepositoryInterface,
    UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenClaims};
use crate::infrastructure::crypto::password::{dummy_verify, hash_password, verify_password};
use crate::shared::{required_text, PageRequest, PaginatedResult};

/// Authentication result returned after a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: User,
}

/// Input for [`UserService::register`]
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Requested role name; honored only for an admin caller
    pub role: Option<String>,
}

/// User service: orchestrates all identity / user-management use-cases.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and return a fresh token.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repo.find_by_username(username.trim()).await? else {
            dummy_verify(password);
            warn!(username, "Login failed: unknown username");
            return Err(DomainError::InvalidCredentials);
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            error!(user_id = user.id, error = %e, "Stored password hash is unreadable");
            false
        });
        if !valid {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        if !user.is_active {
            warn!(user_id = user.id, "Login refused: account inactive");
            return Err(DomainError::AccountInactive);
        }

        let now = Utc::now();
        self.repo.record_login(user.id, now).await?;
        let user = User {
            last_login_at: Some(now),
            ..user
        };

        info!(user_id = user.id, username = %user.username, "User logged in");
        self.issue(user)
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an account and log it in.
    ///
    /// `caller` is the authenticated requester, if any. A requested role is
    /// honored only when the caller is an admin; otherwise the account gets
    /// the default role.
    pub async fn register(
        &self,
        input: RegisterUser,
        caller: Option<&TokenClaims>,
    ) -> DomainResult<AuthResult> {
        let username = required_text("username", &input.username, 3, 50)?;
        let full_name = required_text("full_name", &input.full_name, 2, 150)?;
        let email = Email::new(&input.email)?;

        if self.repo.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Duplicate("Username already exists".into()));
        }
        if self.repo.find_by_email(email.as_str()).await?.is_some() {
            return Err(DomainError::Duplicate("Email already exists".into()));
        }

        let role = resolve_role(input.role.as_deref(), caller);

        let user = User {
            id: 0,
            username,
            email: email.into_inner(),
            full_name,
            password_hash: hash_password(&input.password),
            role,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        };
        let user = self.repo.create(user).await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "New user registered");
        self.issue(user)
    }

    /// Create an admin account when no users exist yet.
    ///
    /// Returns the created account, or `None` if the store was not empty.
    pub async fn seed_admin(&self, input: RegisterUser) -> DomainResult<Option<User>> {
        if self.repo.count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .repo
            .create(User {
                id: 0,
                username: required_text("username", &input.username, 3, 50)?,
                email: Email::new(&input.email)?.into_inner(),
                full_name: required_text("full_name", &input.full_name, 2, 150)?,
                password_hash: hash_password(&input.password),
                role: UserRole::Admin,
                is_active: true,
                created_at: Utc::now(),
                last_login_at: None,
            })
            .await?;

        warn!(user_id = user.id, username = %user.username, "Seeded default admin account; change its password");
        Ok(Some(user))
    }

    // ── Tokens ──────────────────────────────────────────────────

    pub fn verify_token(&self, token: &str) -> DomainResult<TokenClaims> {
        verify_token(token, &self.jwt_config).map_err(|e| {
            warn!(error = %e, "Token rejected");
            DomainError::InvalidToken
        })
    }

    /// Account behind a verified token.
    ///
    /// A token whose account is gone or deactivated no longer authenticates.
    pub async fn current_user(&self, claims: &TokenClaims) -> DomainResult<User> {
        let id = claims.user_id().ok_or(DomainError::InvalidToken)?;
        match self.repo.find_by_id(id).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => Err(DomainError::AccountInactive),
            None => Err(DomainError::InvalidToken),
        }
    }

    fn issue(&self, user: User) -> DomainResult<AuthResult> {
        let token = create_token(&user, &self.jwt_config).map_err(|e| {
            DomainError::Internal(format!("Failed to create token: {}", e))
        })?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_minutes * 60,
            user,
        })
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(User::ENTITY, user_id))?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        self.repo
            .update(User {
                password_hash: hash_password(new_password),
                ..user
            })
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Admin update of role, active flag and full name.
    pub async fn update_user(&self, id: i64, dto: UpdateUserDto) -> DomainResult<User> {
        let mut user = self.get_user(id).await?;

        if let Some(full_name) = dto.full_name {
            user.full_name = required_text("full_name", &full_name, 2, 150)?;
        }
        if let Some(role) = dto.role {
            user.role = role;
        }
        if let Some(is_active) = dto.is_active {
            user.is_active = is_active;
        }

        let user = self.repo.update(user).await?;
        info!(user_id = id, role = %user.role, is_active = user.is_active, "User updated");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, page: PageRequest) -> DomainResult<PaginatedResult<User>> {
        let total = self.repo.count().await?;
        let items = self.repo.list(page.offset(), page.page_size).await?;
        Ok(PaginatedResult::new(items, total, page))
    }

    pub async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(User::ENTITY, id))
    }
}

fn resolve_role(requested: Option<&str>, caller: Option<&TokenClaims>) -> UserRole {
    let Some(requested) = requested else {
        return UserRole::default();
    };
    let role = UserRole::parse_or_default(requested);
    if role == UserRole::default() || caller.is_some_and(|c| c.role() == UserRole::Admin) {
        return role;
    }
    warn!(requested, "Requested role ignored for self-registration");
    UserRole::default()
}
