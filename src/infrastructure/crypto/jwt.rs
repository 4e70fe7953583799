//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserRole};

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    /// Audience claim
    pub audience: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production-please-32b".to_string(),
            issuer: "staff-service".to_string(),
            audience: "staff-service-clients".to_string(),
            expiration_minutes: 60,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish_non_exhaustive()
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub full_name: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

impl TokenClaims {
    pub fn new(user: &User, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(config.expiration_minutes);

        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            full_name: user.full_name.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// Role from the claim; an unknown name is treated as the lowest role.
    pub fn role(&self) -> UserRole {
        UserRole::parse_or_default(&self.role)
    }
}

/// Create a signed JWT token for a user
pub fn create_token(user: &User, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user, config);
    encode_claims(&claims, config)
}

pub(crate) fn encode_claims(
    claims: &TokenClaims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, issuer, audience and expiry, and decode the claims
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            username: "joao".into(),
            email: "joao@x.com".into(),
            full_name: "João Silva".into(),
            password_hash: String::new(),
            role: UserRole::Manager,
            is_active: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = JwtConfig::default();
        let token = create_token(&user(), &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.username, "joao");
        assert_eq!(claims.email, "joao@x.com");
        assert_eq!(claims.full_name, "João Silva");
        assert_eq!(claims.role(), UserRole::Manager);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_invalid_token() {
        let config = JwtConfig::default();
        assert!(verify_token("invalid-token", &config).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = JwtConfig::default();
        let mut claims = TokenClaims::new(&user(), &config);
        claims.iat -= 2 * 3600;
        claims.exp = Utc::now().timestamp() - 60;
        let token = encode_claims(&claims, &config).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_issuer_audience_or_key_rejected() {
        let config = JwtConfig::default();
        let token = create_token(&user(), &config).unwrap();

        let other_issuer = JwtConfig {
            issuer: "someone-else".into(),
            ..JwtConfig::default()
        };
        assert!(verify_token(&token, &other_issuer).is_err());

        let other_audience = JwtConfig {
            audience: "other-app".into(),
            ..JwtConfig::default()
        };
        assert!(verify_token(&token, &other_audience).is_err());

        let other_key = JwtConfig {
            secret: "a-completely-different-signing-key".into(),
            ..JwtConfig::default()
        };
        assert!(verify_token(&token, &other_key).is_err());
    }
}
