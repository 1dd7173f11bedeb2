use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::session::errors::SessionError;

pub mod admin;
pub mod create_user;
pub mod health;
pub mod login;
pub mod refresh;
pub mod revoke;
pub mod update_user;

const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";
const UNAUTHORIZED: &str = "Unauthorized";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";
const RESET_FORBIDDEN: &str = "Reset is only allowed in the dev platform";
const INVALID_REQUEST_BODY: &str = "Invalid request body";
const INVALID_EMAIL: &str = "Invalid email";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error reported to HTTP clients.
///
/// Messages are fixed strings or request-validation detail; internal error
/// detail is logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError,
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    InvalidCredentials,
    Unauthorized,
    Forbidden,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR.to_string(),
            ),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, INCORRECT_CREDENTIALS.to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED.to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, RESET_FORBIDDEN.to_string()),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => ApiError::InvalidCredentials,
            SessionError::Unauthorized => ApiError::Unauthorized,
            SessionError::Validation(msg) => ApiError::UnprocessableEntity(msg),
            SessionError::Forbidden => ApiError::Forbidden,
            SessionError::Persistence(e) => {
                tracing::error!(error = %e, retryable = e.is_retryable(), "Persistence failure");
                ApiError::InternalServerError
            }
            SessionError::Internal(msg) => {
                tracing::error!(error = %msg, "Session failure");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmptyPassword => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::Store(e) => {
                tracing::error!(error = %e, retryable = e.is_retryable(), "Persistence failure");
                ApiError::InternalServerError
            }
            AccountError::Password(_) | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Account failure");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::UnprocessableEntity(INVALID_REQUEST_BODY.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;

    #[test]
    fn test_credential_failures_share_one_message() {
        let response = ApiError::from(SessionError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_persistence_detail_is_not_exposed() {
        let err = SessionError::Persistence(StoreError::Database(
            "relation \"refresh_tokens\" does not exist".to_string(),
        ));

        assert_eq!(ApiError::from(err), ApiError::InternalServerError);
    }

    #[test]
    fn test_session_error_mapping() {
        assert_eq!(
            ApiError::from(SessionError::Unauthorized),
            ApiError::Unauthorized
        );
        assert_eq!(ApiError::from(SessionError::Forbidden), ApiError::Forbidden);
        assert_eq!(
            ApiError::from(SessionError::Validation("email is required".to_string())),
            ApiError::UnprocessableEntity("email is required".to_string())
        );
        assert_eq!(
            ApiError::from(SessionError::Internal("join error".to_string())),
            ApiError::InternalServerError
        );
    }

    #[test]
    fn test_account_error_mapping() {
        assert!(matches!(
            ApiError::from(AccountError::EmailAlreadyExists("a@b.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::EmptyPassword),
            ApiError::UnprocessableEntity(_)
        ));
        assert_eq!(
            ApiError::from(AccountError::Store(StoreError::Unavailable(
                "timeout".to_string()
            ))),
            ApiError::InternalServerError
        );
    }
}
