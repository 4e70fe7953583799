//! Domain error → HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::common::ApiResponse;
use crate::domain::DomainError;

/// Error returned by handlers and middleware.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_)
            | DomainError::Duplicate(_)
            | DomainError::InvalidCredentials
            | DomainError::AccountInactive => StatusCode::BAD_REQUEST,
            DomainError::InvalidToken | DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.0 {
            DomainError::Internal(detail) => {
                error!(%detail, "Internal error while handling request");
                "Internal server error".to_string()
            }
            other => {
                if status == StatusCode::FORBIDDEN {
                    warn!("Request denied: insufficient role");
                }
                other.to_string()
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(DomainError::Duplicate("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::InvalidCredentials), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::AccountInactive), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::InvalidToken), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::not_found("Employee", 3)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(DomainError::Internal("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let resp = ApiError::from(DomainError::Internal("password column missing".into()))
            .into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Internal server error");
    }
}
