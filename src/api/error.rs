//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::identity::IdentityError;
use crate::matching::{ErrorKind, MatchError};

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".to_string(),
            ),
            ApiError::Forbidden(detail) => (StatusCode::FORBIDDEN, "FORBIDDEN", detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", detail),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, "CONFLICT", detail),
            ApiError::InvalidStateTransition(detail) => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION", detail)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::InvalidArgument => ApiError::BadRequest(message),
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Conflict => ApiError::Conflict(message),
            ErrorKind::Unauthorized => ApiError::Forbidden(message),
            ErrorKind::InvalidStateTransition => ApiError::InvalidStateTransition(message),
            ErrorKind::Internal => ApiError::Internal(message),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailTaken => ApiError::Conflict(err.to_string()),
            IdentityError::InvalidCredentials => ApiError::InvalidCredentials,
            IdentityError::InvalidToken => ApiError::Unauthorized,
            IdentityError::InvalidInput(detail) => ApiError::BadRequest(detail),
            IdentityError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<crate::db::DatabaseError> for ApiError {
    fn from(err: crate::db::DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_returns_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "AUTH_REQUIRED");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("disk on fire".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn match_error_kinds_map_to_statuses() {
        let cases = [
            (MatchError::InvalidArgument("bad".into()), StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            (MatchError::not_found("Donor", "x"), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (MatchError::Conflict("taken".into()), StatusCode::CONFLICT, "CONFLICT"),
            (MatchError::Unauthorized("no".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (
                MatchError::InvalidStateTransition {
                    from: crate::models::MatchStatus::Completed,
                    to: "accepted".into(),
                },
                StatusCode::CONFLICT,
                "INVALID_STATE_TRANSITION",
            ),
        ];

        for (err, status, code) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await["error"]["code"], code);
        }
    }

    #[tokio::test]
    async fn not_found_message_is_readable() {
        let response = ApiError::from(MatchError::not_found("Match", "42")).into_response();
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Match not found: 42");
    }

    #[test]
    fn identity_errors_map() {
        assert!(matches!(ApiError::from(IdentityError::InvalidToken), ApiError::Unauthorized));
        assert!(matches!(ApiError::from(IdentityError::EmailTaken), ApiError::Conflict(_)));
        assert!(matches!(
            ApiError::from(IdentityError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
    }
}
